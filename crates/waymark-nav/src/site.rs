//! Site chrome and the assembled navigation artifact.
//!
//! A site is more than its sidebars: the navbar and footer carry links of
//! their own, and the whole navigation serializes as one artifact the
//! frontend loads at startup. [`build_site_nav`] assembles that artifact
//! from a [`SiteSpec`], a loaded [`SidebarSet`] and a document index,
//! running sidebar resolution and chrome link checks in the same pass so
//! every problem lands in a single report.

use serde::Serialize;
use waymark_index::DocIndex;

use crate::error::{Issue, IssueKind, SidebarError, ValidationReport};
use crate::node::SidebarSet;
use crate::render::{Navigation, Routing, render};
use crate::resolve::resolve_report;

/// Site identity carried into the artifact verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeta {
    /// Site title, e.g. `Azure ML (v2)`.
    pub title: String,
    /// Short strapline shown alongside the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Canonical origin, e.g. `https://contoso.github.io`.
    pub url: String,
    /// Path prefix every generated href starts with.
    pub base_url: String,
    /// Owning organization, when the site is published to project pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Project name, when the site is published to project pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// What to do when a chrome link points at an unknown document.
///
/// Sidebar entries are always checked strictly; this policy covers only the
/// navbar and footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrokenLinkPolicy {
    /// Keep the link without comment.
    Ignore,
    /// Keep the link, log a warning.
    #[default]
    Warn,
    /// Fail the build.
    Throw,
}

/// Where a chrome link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A document id, routed like a sidebar entry and checked against the
    /// index.
    Doc(String),
    /// A site-relative route joined onto the base url.
    Route(String),
    /// An absolute href, passed through untouched.
    Href(String),
}

impl LinkTarget {
    fn href(&self, routing: &Routing) -> String {
        match self {
            Self::Doc(id) => routing.doc_href(id),
            Self::Route(to) => routing.route_href(to),
            Self::Href(url) => url.clone(),
        }
    }

    fn doc_id(&self) -> Option<&str> {
        match self {
            Self::Doc(id) => Some(id),
            Self::Route(_) | Self::Href(_) => None,
        }
    }
}

/// Navbar side an item docks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// One navbar entry as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarItemSpec {
    /// Display label.
    pub label: String,
    /// Link target.
    pub target: LinkTarget,
    /// Which side of the navbar the item docks to.
    pub position: NavbarPosition,
}

/// Navbar declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavbarSpec {
    /// Overrides the site title in the navbar when set.
    pub title: Option<String>,
    /// Entries in display order.
    pub items: Vec<NavbarItemSpec>,
}

/// One footer link as declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLinkSpec {
    /// Display label.
    pub label: String,
    /// Link target.
    pub target: LinkTarget,
}

/// Titled group of footer links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterGroupSpec {
    /// Group heading.
    pub title: String,
    /// Links in display order.
    pub links: Vec<FooterLinkSpec>,
}

/// Footer declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FooterSpec {
    /// Theme hint passed through to the frontend, e.g. `dark`.
    pub style: Option<String>,
    /// Copyright line, already expanded.
    pub copyright: Option<String>,
    /// Link groups in display order.
    pub groups: Vec<FooterGroupSpec>,
}

/// Navbar and footer declarations together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteChrome {
    /// Navbar declaration. An empty navbar still renders with the site
    /// title.
    pub navbar: NavbarSpec,
    /// Footer declaration, omitted entirely when `None`.
    pub footer: Option<FooterSpec>,
}

/// Everything the artifact build needs besides the sidebars themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSpec {
    /// Site identity.
    pub meta: SiteMeta,
    /// Href construction rules.
    pub routing: Routing,
    /// Navbar and footer.
    pub chrome: SiteChrome,
    /// Policy for chrome links pointing at unknown documents.
    pub broken_links: BrokenLinkPolicy,
}

/// Rendered navbar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarLink {
    /// Display label.
    pub label: String,
    /// Resolved href.
    pub href: String,
    /// Which side of the navbar the link docks to.
    pub position: NavbarPosition,
}

/// Rendered navbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navbar {
    /// Navbar title, falling back to the site title.
    pub title: String,
    /// Links in display order.
    pub links: Vec<NavbarLink>,
}

/// Rendered footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    /// Display label.
    pub label: String,
    /// Resolved href.
    pub href: String,
}

/// Rendered footer group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterGroup {
    /// Group heading.
    pub title: String,
    /// Links in display order.
    pub links: Vec<FooterLink>,
}

/// Rendered footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Theme hint, e.g. `dark`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Copyright line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Link groups in display order.
    pub groups: Vec<FooterGroup>,
}

/// The complete navigation artifact for one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteNav {
    /// Site identity.
    pub site: SiteMeta,
    /// Rendered navbar.
    pub navbar: Navbar,
    /// Rendered footer, absent when the site declares none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    /// Rendered sidebars in source order.
    pub sidebars: Vec<Navigation>,
}

/// Assemble the full navigation artifact.
///
/// Sidebars are validated against the index exactly as
/// [`resolve`](crate::resolve) validates them, and chrome document links are
/// checked under the site's [`BrokenLinkPolicy`]. Problems from both passes
/// come back together in one [`SidebarError::Invalid`].
pub fn build_site_nav(
    spec: &SiteSpec,
    set: &SidebarSet,
    index: &dyn DocIndex,
) -> Result<SiteNav, SidebarError> {
    let mut report = resolve_report(set, index);
    check_chrome_links(&spec.chrome, spec.broken_links, index, &mut report);
    report.into_result()?;

    let navbar = Navbar {
        title: spec
            .chrome
            .navbar
            .title
            .clone()
            .unwrap_or_else(|| spec.meta.title.clone()),
        links: spec
            .chrome
            .navbar
            .items
            .iter()
            .map(|item| NavbarLink {
                label: item.label.clone(),
                href: item.target.href(&spec.routing),
                position: item.position,
            })
            .collect(),
    };
    let footer = spec.chrome.footer.as_ref().map(|footer| Footer {
        style: footer.style.clone(),
        copyright: footer.copyright.clone(),
        groups: footer
            .groups
            .iter()
            .map(|group| FooterGroup {
                title: group.title.clone(),
                links: group
                    .links
                    .iter()
                    .map(|link| FooterLink {
                        label: link.label.clone(),
                        href: link.target.href(&spec.routing),
                    })
                    .collect(),
            })
            .collect(),
    });

    tracing::debug!(
        sidebars = set.len(),
        navbar_links = navbar.links.len(),
        "Assembled site navigation"
    );

    Ok(SiteNav {
        site: spec.meta.clone(),
        navbar,
        footer,
        sidebars: render(set, index, &spec.routing),
    })
}

/// Check every `Doc` target in the chrome against the index.
///
/// Issue paths mirror the configuration layout, e.g. `navbar.items[0]` and
/// `footer.groups[1].links[2]`.
fn check_chrome_links(
    chrome: &SiteChrome,
    policy: BrokenLinkPolicy,
    index: &dyn DocIndex,
    report: &mut ValidationReport,
) {
    let mut check = |scope: &str, path: String, id: &str| {
        if index.has(id) {
            return;
        }
        match policy {
            BrokenLinkPolicy::Ignore => {}
            BrokenLinkPolicy::Warn => {
                tracing::warn!(scope, %path, %id, "Link points at an unknown document");
            }
            BrokenLinkPolicy::Throw => report.push(Issue::new(
                scope,
                path,
                IssueKind::UnknownDocument { id: id.to_owned() },
            )),
        }
    };

    for (i, item) in chrome.navbar.items.iter().enumerate() {
        if let Some(id) = item.target.doc_id() {
            check("navbar", format!(".items[{i}]"), id);
        }
    }
    if let Some(footer) = &chrome.footer {
        for (g, group) in footer.groups.iter().enumerate() {
            for (l, link) in group.links.iter().enumerate() {
                if let Some(id) = link.target.doc_id() {
                    check("footer", format!(".groups[{g}].links[{l}]"), id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use waymark_index::InMemoryDocIndex;

    use super::*;
    use crate::loader::load_value;

    fn sample_meta() -> SiteMeta {
        SiteMeta {
            title: "Azure ML (v2)".to_owned(),
            tagline: Some("Test the next generation".to_owned()),
            url: "https://contoso.github.io".to_owned(),
            base_url: "/azureml-v2-preview/".to_owned(),
            organization: None,
            project: None,
        }
    }

    fn sample_spec() -> SiteSpec {
        SiteSpec {
            meta: sample_meta(),
            routing: Routing::new("/azureml-v2-preview/", "docs/"),
            chrome: SiteChrome {
                navbar: NavbarSpec {
                    title: None,
                    items: vec![
                        NavbarItemSpec {
                            label: "Docs".to_owned(),
                            target: LinkTarget::Doc("userguide/README".to_owned()),
                            position: NavbarPosition::Left,
                        },
                        NavbarItemSpec {
                            label: "GitHub".to_owned(),
                            target: LinkTarget::Href("https://github.com/contoso/ml".to_owned()),
                            position: NavbarPosition::Right,
                        },
                    ],
                },
                footer: Some(FooterSpec {
                    style: Some("dark".to_owned()),
                    copyright: Some("Copyright \u{a9} 2021 Contoso".to_owned()),
                    groups: vec![FooterGroupSpec {
                        title: "Docs".to_owned(),
                        links: vec![FooterLinkSpec {
                            label: "Cheat Sheet".to_owned(),
                            target: LinkTarget::Route("docs/cheatsheet/".to_owned()),
                        }],
                    }],
                }),
            },
            broken_links: BrokenLinkPolicy::Throw,
        }
    }

    fn sample_set() -> SidebarSet {
        load_value(&json!({"userguide": ["userguide/README"]})).unwrap()
    }

    fn sample_index() -> InMemoryDocIndex {
        InMemoryDocIndex::from_pairs([("userguide/README", "Introduction")])
    }

    // Assembly tests

    #[test]
    fn test_build_site_nav() {
        let nav = build_site_nav(&sample_spec(), &sample_set(), &sample_index()).unwrap();

        assert_eq!(nav.navbar.title, "Azure ML (v2)");
        assert_eq!(
            nav.navbar.links[0].href,
            "/azureml-v2-preview/docs/userguide/README"
        );
        assert_eq!(nav.navbar.links[1].href, "https://github.com/contoso/ml");
        let footer = nav.footer.as_ref().unwrap();
        assert_eq!(
            footer.groups[0].links[0].href,
            "/azureml-v2-preview/docs/cheatsheet/"
        );
        assert_eq!(nav.sidebars.len(), 1);
        assert_eq!(nav.sidebars[0].items[0].title, "Introduction");
    }

    #[test]
    fn test_navbar_title_override() {
        let mut spec = sample_spec();
        spec.chrome.navbar.title = Some("ML Docs".to_owned());

        let nav = build_site_nav(&spec, &sample_set(), &sample_index()).unwrap();

        assert_eq!(nav.navbar.title, "ML Docs");
    }

    #[test]
    fn test_no_footer_declared() {
        let mut spec = sample_spec();
        spec.chrome.footer = None;

        let nav = build_site_nav(&spec, &sample_set(), &sample_index()).unwrap();

        assert_eq!(nav.footer, None);
    }

    // Broken link policy tests

    fn spec_with_broken_navbar_doc(policy: BrokenLinkPolicy) -> SiteSpec {
        let mut spec = sample_spec();
        spec.broken_links = policy;
        spec.chrome.navbar.items = vec![NavbarItemSpec {
            label: "Missing".to_owned(),
            target: LinkTarget::Doc("missing".to_owned()),
            position: NavbarPosition::Left,
        }];
        spec
    }

    #[test]
    fn test_throw_policy_reports_broken_navbar_link() {
        let spec = spec_with_broken_navbar_doc(BrokenLinkPolicy::Throw);

        let err = build_site_nav(&spec, &sample_set(), &sample_index()).unwrap_err();

        let report = err.report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.issues()[0].to_string(),
            "navbar.items[0]: unknown document id `missing`"
        );
    }

    #[test]
    fn test_warn_policy_keeps_broken_link() {
        let spec = spec_with_broken_navbar_doc(BrokenLinkPolicy::Warn);

        let nav = build_site_nav(&spec, &sample_set(), &sample_index()).unwrap();

        assert_eq!(nav.navbar.links[0].href, "/azureml-v2-preview/docs/missing");
    }

    #[test]
    fn test_ignore_policy_keeps_broken_link() {
        let spec = spec_with_broken_navbar_doc(BrokenLinkPolicy::Ignore);

        assert!(build_site_nav(&spec, &sample_set(), &sample_index()).is_ok());
    }

    #[test]
    fn test_footer_broken_link_path() {
        let mut spec = sample_spec();
        spec.chrome.footer.as_mut().unwrap().groups[0].links[0].target =
            LinkTarget::Doc("gone".to_owned());

        let err = build_site_nav(&spec, &sample_set(), &sample_index()).unwrap_err();

        assert_eq!(
            err.report().unwrap().issues()[0].to_string(),
            "footer.groups[0].links[0]: unknown document id `gone`"
        );
    }

    #[test]
    fn test_route_targets_are_not_checked() {
        let mut spec = sample_spec();
        spec.chrome.navbar.items = vec![NavbarItemSpec {
            label: "Somewhere".to_owned(),
            target: LinkTarget::Route("docs/nowhere/".to_owned()),
            position: NavbarPosition::Left,
        }];

        assert!(build_site_nav(&spec, &sample_set(), &sample_index()).is_ok());
    }

    #[test]
    fn test_sidebar_and_chrome_problems_merge() {
        let spec = spec_with_broken_navbar_doc(BrokenLinkPolicy::Throw);
        let set = load_value(&json!({"userguide": ["userguide/README", "ghost"]})).unwrap();

        let err = build_site_nav(&spec, &set, &sample_index()).unwrap_err();

        let rendered: Vec<String> = err
            .report()
            .unwrap()
            .issues()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "userguide[1]: unknown document id `ghost`",
                "navbar.items[0]: unknown document id `missing`",
            ]
        );
    }

    // Serialization tests

    #[test]
    fn test_site_nav_serialization_shape() {
        let nav = build_site_nav(&sample_spec(), &sample_set(), &sample_index()).unwrap();

        let value = serde_json::to_value(&nav).unwrap();

        assert_eq!(value["site"]["baseUrl"], json!("/azureml-v2-preview/"));
        assert_eq!(value["navbar"]["links"][1]["position"], json!("right"));
        assert_eq!(value["footer"]["style"], json!("dark"));
        assert_eq!(
            value["sidebars"][0]["items"][0]["href"],
            json!("/azureml-v2-preview/docs/userguide/README")
        );
        assert!(value["site"].get("organization").is_none());
    }
}
