//! Sidebar tree model.
//!
//! A sidebars document describes one or more named sidebars, each an ordered
//! tree of document references and collapsible categories. The model here is
//! what [`load`](crate::load_value) produces and what
//! [`resolve`](crate::resolve) and [`render`](crate::render) consume.
//!
//! The tree is built once per site build and never mutated afterwards; any
//! configuration change rebuilds it wholesale.

use serde::Serialize;

/// One entry in a sidebar: either a document leaf or a category grouping.
///
/// Serializes with the canonical tagged vocabulary (`{"type": "doc", ...}`,
/// `{"type": "category", ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// Leaf pointing at a content document.
    Doc(DocRef),
    /// Named, collapsible grouping of child nodes.
    Category(Category),
}

impl NavNode {
    /// Document leaf without a label override.
    pub fn doc(id: impl Into<String>) -> Self {
        NavNode::Doc(DocRef::new(id))
    }

    /// Document leaf with an explicit display label.
    pub fn doc_with_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        NavNode::Doc(DocRef {
            id: id.into(),
            label: Some(label.into()),
        })
    }

    /// Expanded category with the given children.
    pub fn category(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        NavNode::Category(Category::new(label, items))
    }
}

/// Reference to a single content document.
///
/// `id` must name a document known to the document index by the time the
/// tree is resolved; an unresolved id fails the whole build. `label`
/// overrides the document's own title in the rendered navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRef {
    /// Document id, e.g. `userguide/workspace`.
    pub id: String,
    /// Display label override. `None` falls back to the document title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DocRef {
    /// Reference without a label override.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}

/// Collapsible grouping of child nodes.
///
/// Categories nest to arbitrary depth. `items` is never empty in a loaded
/// tree; the loader rejects empty categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Heading shown for the group.
    pub label: String,
    /// Whether the group starts collapsed. Defaults to `false`.
    pub collapsed: bool,
    /// Child nodes, in display order.
    pub items: Vec<NavNode>,
}

impl Category {
    /// Expanded category with the given children.
    pub fn new(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        Self {
            label: label.into(),
            collapsed: false,
            items,
        }
    }
}

/// One named sidebar: an ordered sequence of top-level nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    /// Sidebar name from the document, e.g. `userguide`.
    pub name: String,
    /// Top-level entries, in display order.
    pub nodes: Vec<NavNode>,
}

impl Sidebar {
    pub fn new(name: impl Into<String>, nodes: Vec<NavNode>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    /// Visit every node depth-first, in display order.
    ///
    /// The visitor receives each node's position path relative to the
    /// sidebar, e.g. `[1].items[0]` for the first child of the second
    /// top-level entry.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&str, &'a NavNode),
    {
        walk_nodes(&self.nodes, "", visit);
    }

    /// Number of document references at any depth.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, node| {
            if matches!(node, NavNode::Doc(_)) {
                count += 1;
            }
        });
        count
    }
}

fn walk_nodes<'a, F>(nodes: &'a [NavNode], prefix: &str, visit: &mut F)
where
    F: FnMut(&str, &'a NavNode),
{
    for (position, node) in nodes.iter().enumerate() {
        let path = format!("{prefix}[{position}]");
        visit(&path, node);
        if let NavNode::Category(category) = node {
            let child_prefix = format!("{path}.items");
            walk_nodes(&category.items, &child_prefix, visit);
        }
    }
}

/// All sidebars of one document, in source order.
///
/// Sidebar names are unique within a set; lookups by name are linear, which
/// is fine for the handful of sidebars a site carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarSet {
    sidebars: Vec<Sidebar>,
}

impl SidebarSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sidebar, keeping source order.
    pub fn push(&mut self, sidebar: Sidebar) {
        self.sidebars.push(sidebar);
    }

    /// Look up a sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sidebar> {
        self.sidebars.iter().find(|s| s.name == name)
    }

    /// All sidebars, in source order.
    #[must_use]
    pub fn sidebars(&self) -> &[Sidebar] {
        &self.sidebars
    }

    /// Sidebar names, in source order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.sidebars.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sidebar> {
        self.sidebars.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}

impl IntoIterator for SidebarSet {
    type Item = Sidebar;
    type IntoIter = std::vec::IntoIter<Sidebar>;

    fn into_iter(self) -> Self::IntoIter {
        self.sidebars.into_iter()
    }
}

impl<'a> IntoIterator for &'a SidebarSet {
    type Item = &'a Sidebar;
    type IntoIter = std::slice::Iter<'a, Sidebar>;

    fn into_iter(self) -> Self::IntoIter {
        self.sidebars.iter()
    }
}
