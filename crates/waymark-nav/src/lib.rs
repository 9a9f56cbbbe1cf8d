//! Sidebar loading, validation and rendering for Waymark.
//!
//! This crate turns a declarative sidebars document into render-ready
//! navigation:
//! - [`load_path`] / [`load_json_str`] / [`load_yaml_str`]: parse a sidebars
//!   document into a validated [`SidebarSet`]
//! - [`resolve`]: check every document reference against a
//!   [`DocIndex`](waymark_index::DocIndex)
//! - [`render`]: produce the [`Navigation`] trees the frontend consumes
//! - [`build_site_nav`]: assemble sidebars, navbar and footer into one
//!   [`SiteNav`] artifact
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), waymark_nav::SidebarError> {
//! use waymark_index::InMemoryDocIndex;
//! use waymark_nav::{Routing, load_json_str, render, resolve};
//!
//! let set = load_json_str(
//!     r#"{"userguide": [
//!         {"type": "doc", "id": "README"},
//!         {"type": "category", "label": "Concepts", "items": ["job", "endpoint"]}
//!     ]}"#,
//! )?;
//!
//! let index = InMemoryDocIndex::from_pairs([
//!     ("README", "Introduction"),
//!     ("job", "Job"),
//!     ("endpoint", "Endpoint"),
//! ]);
//! let set = resolve(set, &index)?;
//!
//! let navigation = render(&set, &index, &Routing::default());
//! assert_eq!(navigation[0].items[0].title, "Introduction");
//! # Ok(())
//! # }
//! ```

pub(crate) mod error;
pub(crate) mod loader;
pub(crate) mod node;
pub(crate) mod render;
pub(crate) mod resolve;
pub(crate) mod schema;
pub(crate) mod site;

pub use error::{Issue, IssueKind, SidebarError, ValidationReport};
pub use loader::{load_json_str, load_path, load_value, load_yaml_str};
pub use node::{Category, DocRef, NavNode, Sidebar, SidebarSet};
pub use render::{NavItem, Navigation, Routing, render, render_sidebar};
pub use resolve::{resolve, resolve_report};
pub use schema::SchemaRevision;
pub use site::{
    BrokenLinkPolicy, Footer, FooterGroup, FooterGroupSpec, FooterLink, FooterLinkSpec, FooterSpec,
    LinkTarget, Navbar, NavbarItemSpec, NavbarLink, NavbarPosition, NavbarSpec, SiteChrome,
    SiteMeta, SiteNav, SiteSpec, build_site_nav,
};
