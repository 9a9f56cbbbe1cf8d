//! Render-ready navigation structures.
//!
//! Rendering flattens the validated tree into the shape the page-rendering
//! layer consumes: display titles resolved, hrefs joined from the site's
//! routing, order untouched. It is a pure function of the set, the index,
//! and the routing; rendering the same inputs twice yields identical
//! output.

use rayon::prelude::*;
use serde::Serialize;
use waymark_index::DocIndex;

use crate::node::{DocRef, NavNode, Sidebar, SidebarSet};

/// URL construction for rendered document links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    base_url: String,
    route_base: String,
}

impl Routing {
    /// `base_url` is the site's root path (e.g. `/azureml-v2-preview/`),
    /// `route_base` the docs prefix under it (e.g. `docs/`). Missing
    /// slashes are added.
    #[must_use]
    pub fn new(base_url: &str, route_base: &str) -> Self {
        Self {
            base_url: normalize_base(base_url),
            route_base: normalize_route(route_base),
        }
    }

    /// Href for a document id: base url, docs route, then the id.
    #[must_use]
    pub fn doc_href(&self, id: &str) -> String {
        format!("{}{}{}", self.base_url, self.route_base, id)
    }

    /// Href for a site-relative route such as `docs/cheatsheet/`.
    #[must_use]
    pub fn route_href(&self, to: &str) -> String {
        format!("{}{}", self.base_url, to.trim_start_matches('/'))
    }
}

impl Default for Routing {
    fn default() -> Self {
        Self::new("/", "docs/")
    }
}

fn normalize_base(base: &str) -> String {
    let mut base = base.to_owned();
    if !base.starts_with('/') {
        base.insert(0, '/');
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

fn normalize_route(route: &str) -> String {
    let route = route.trim_start_matches('/');
    if route.is_empty() || route.ends_with('/') {
        route.to_owned()
    } else {
        format!("{route}/")
    }
}

/// One rendered navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display text: label override, document title, or category label.
    pub title: String,
    /// Link target. Present for document leaves, absent for categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Collapse state. Present for categories only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child entries, in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    /// Leaf entry linking to a document.
    pub fn leaf(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: Some(href.into()),
            collapsed: None,
            children: Vec::new(),
        }
    }

    /// Group entry with children.
    pub fn group(title: impl Into<String>, collapsed: bool, children: Vec<NavItem>) -> Self {
        Self {
            title: title.into(),
            href: None,
            collapsed: Some(collapsed),
            children,
        }
    }
}

/// Rendered form of one sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Name of the sidebar this was rendered from.
    pub sidebar: String,
    /// Top-level entries, in display order.
    pub items: Vec<NavItem>,
}

/// Render every sidebar in the set, in source order.
///
/// Sidebars render in parallel; the output order still follows the source.
pub fn render(set: &SidebarSet, index: &dyn DocIndex, routing: &Routing) -> Vec<Navigation> {
    set.sidebars()
        .par_iter()
        .map(|sidebar| render_sidebar(sidebar, index, routing))
        .collect()
}

/// Render one sidebar.
pub fn render_sidebar(sidebar: &Sidebar, index: &dyn DocIndex, routing: &Routing) -> Navigation {
    Navigation {
        sidebar: sidebar.name.clone(),
        items: render_nodes(&sidebar.nodes, index, routing),
    }
}

fn render_nodes(nodes: &[NavNode], index: &dyn DocIndex, routing: &Routing) -> Vec<NavItem> {
    nodes
        .iter()
        .map(|node| render_node(node, index, routing))
        .collect()
}

fn render_node(node: &NavNode, index: &dyn DocIndex, routing: &Routing) -> NavItem {
    match node {
        NavNode::Doc(doc) => NavItem::leaf(doc_title(doc, index), routing.doc_href(&doc.id)),
        NavNode::Category(category) => NavItem::group(
            category.label.clone(),
            category.collapsed,
            render_nodes(&category.items, index, routing),
        ),
    }
}

/// Label override first, then the document's own title, then a title-cased
/// form of the id's last segment.
fn doc_title(doc: &DocRef, index: &dyn DocIndex) -> String {
    if let Some(label) = &doc.label {
        return label.clone();
    }
    index.title_of(&doc.id).unwrap_or_else(|| {
        tracing::warn!(id = %doc.id, "No title for document, deriving one from the id");
        fallback_title(&doc.id)
    })
}

fn fallback_title(id: &str) -> String {
    let slug = id.rsplit('/').next().unwrap_or(id);
    slug.to_lowercase()
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
