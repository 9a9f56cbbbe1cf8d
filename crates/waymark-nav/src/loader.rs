//! Sidebars document loading.
//!
//! Turns a declarative sidebars document into a [`SidebarSet`]. Parsing and
//! invariant checking happen in one pass over the raw document, and every
//! problem is collected before failing: a document with three bad nodes
//! produces one error listing all three, not three consecutive build
//! failures. Issue positions always refer to the document as written.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::error::{Issue, IssueKind, SidebarError, ValidationReport};
use crate::node::{Category, DocRef, NavNode, Sidebar, SidebarSet};
use crate::schema::{self, SchemaRevision};

/// Load a sidebars document from a file.
///
/// `.yml`/`.yaml` files parse as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns [`SidebarError::Io`] if the file cannot be read, a parse error
/// for invalid JSON/YAML, or [`SidebarError::Invalid`] listing every bad
/// node.
pub fn load_path(path: &Path) -> Result<SidebarSet, SidebarError> {
    let content = std::fs::read_to_string(path).map_err(|source| SidebarError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yml" || ext == "yaml");
    if is_yaml {
        load_yaml_str(&content)
    } else {
        load_json_str(&content)
    }
}

/// Load a sidebars document from a JSON string.
pub fn load_json_str(json: &str) -> Result<SidebarSet, SidebarError> {
    let doc: Value = serde_json::from_str(json)?;
    load_value(&doc)
}

/// Load a sidebars document from a YAML string.
pub fn load_yaml_str(yaml: &str) -> Result<SidebarSet, SidebarError> {
    let doc: Value = serde_yaml::from_str(yaml)?;
    load_value(&doc)
}

/// Load a sidebars document from an already-parsed value.
///
/// This is the core entry point that [`load_path`] and the string variants
/// delegate to. See the module docs for the error collection policy.
pub fn load_value(doc: &Value) -> Result<SidebarSet, SidebarError> {
    let (revision, sidebars) = schema::split_envelope(doc)?;
    let Value::Object(map) = sidebars else {
        return Err(SidebarError::Document(
            "`sidebars` must be a mapping of sidebar names".to_owned(),
        ));
    };

    let mut set = SidebarSet::new();
    let mut report = ValidationReport::new();
    for (name, body) in map {
        let mut parser = SidebarParser::new(name, revision);
        let nodes = parser.parse_body(body);
        if nodes.is_empty() && parser.issues.is_empty() {
            tracing::warn!(sidebar = %name, "Sidebar has no entries");
        }
        report.merge(parser.issues.into());
        set.push(Sidebar::new(name.clone(), nodes));
    }

    report.into_result()?;
    tracing::debug!(sidebars = set.len(), "Loaded sidebars document");
    Ok(set)
}

/// Single-pass parser for one sidebar body.
///
/// Malformed nodes are reported and skipped; duplicate ids and empty
/// categories are reported where they occur. The caller discards the
/// partially built tree whenever any issue was recorded.
struct SidebarParser<'a> {
    name: &'a str,
    revision: SchemaRevision,
    seen_ids: HashSet<String>,
    issues: Vec<Issue>,
}

impl<'a> SidebarParser<'a> {
    fn new(name: &'a str, revision: SchemaRevision) -> Self {
        Self {
            name,
            revision,
            seen_ids: HashSet::new(),
            issues: Vec::new(),
        }
    }

    fn parse_body(&mut self, body: &Value) -> Vec<NavNode> {
        match self.revision {
            SchemaRevision::Current => {
                if let Value::Array(entries) = body {
                    self.parse_items(entries, "")
                } else {
                    self.malformed("", "expected a sequence of nodes");
                    Vec::new()
                }
            }
            SchemaRevision::Legacy => {
                if let Value::Object(groups) = body {
                    self.parse_legacy_groups(groups)
                } else {
                    self.malformed("", "expected a mapping from category label to items");
                    Vec::new()
                }
            }
        }
    }

    /// Revision 1 sugar: every `(label, items)` pair becomes an expanded
    /// top-level category, in map order.
    fn parse_legacy_groups(&mut self, groups: &serde_json::Map<String, Value>) -> Vec<NavNode> {
        let mut nodes = Vec::with_capacity(groups.len());
        for (label, items) in groups {
            let path = format!(".{label}");
            if label.trim().is_empty() {
                self.malformed(&path, "category label must not be empty");
                continue;
            }
            match items {
                Value::Array(entries) if entries.is_empty() => {
                    self.issues.push(Issue::new(
                        self.name,
                        &path,
                        IssueKind::EmptyCategory {
                            label: label.clone(),
                        },
                    ));
                }
                Value::Array(entries) => {
                    let children = self.parse_items(entries, &path);
                    nodes.push(NavNode::Category(Category::new(label.clone(), children)));
                }
                other => {
                    self.malformed(
                        &path,
                        format!("category items must be a sequence, found {}", kind_of(other)),
                    );
                }
            }
        }
        nodes
    }

    fn parse_items(&mut self, entries: &[Value], prefix: &str) -> Vec<NavNode> {
        let mut nodes = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let path = format!("{prefix}[{position}]");
            if let Some(node) = self.parse_node(entry, &path) {
                nodes.push(node);
            }
        }
        nodes
    }

    fn parse_node(&mut self, entry: &Value, path: &str) -> Option<NavNode> {
        match entry {
            Value::String(id) => self.parse_shorthand(id, path),
            Value::Object(fields) => self.parse_object(fields, path),
            other => {
                self.malformed(
                    path,
                    format!("expected a string or an object, found {}", kind_of(other)),
                );
                None
            }
        }
    }

    /// A bare string is shorthand for a document reference.
    fn parse_shorthand(&mut self, id: &str, path: &str) -> Option<NavNode> {
        if id.trim().is_empty() {
            self.malformed(path, "document id must not be empty");
            return None;
        }
        self.record_doc_id(id, path);
        Some(NavNode::Doc(DocRef::new(id)))
    }

    fn parse_object(
        &mut self,
        fields: &serde_json::Map<String, Value>,
        path: &str,
    ) -> Option<NavNode> {
        let Some(type_value) = fields.get("type") else {
            self.malformed(path, "node object is missing `type`");
            return None;
        };
        let Some(node_type) = type_value.as_str() else {
            self.malformed(path, "`type` must be a string");
            return None;
        };

        match node_type {
            "doc" => self.parse_doc_object(fields, path),
            "category" => self.parse_category_object(fields, path),
            other => {
                self.malformed(path, format!("unknown node type `{other}`"));
                None
            }
        }
    }

    fn parse_doc_object(
        &mut self,
        fields: &serde_json::Map<String, Value>,
        path: &str,
    ) -> Option<NavNode> {
        let before = self.issues.len();
        self.reject_unknown_fields(fields, path, &["type", "id", "label"]);

        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id.clone()),
            Some(Value::String(_)) => {
                self.malformed(path, "document id must not be empty");
                None
            }
            Some(_) => {
                self.malformed(path, "`id` must be a string");
                None
            }
            None => {
                self.malformed(path, "doc node is missing `id`");
                None
            }
        };

        let label = match fields.get("label") {
            None => None,
            Some(Value::String(label)) => Some(label.clone()),
            Some(_) => {
                self.malformed(path, "`label` must be a string");
                None
            }
        };

        if self.issues.len() > before {
            return None;
        }

        let id = id?;
        self.record_doc_id(&id, path);
        Some(NavNode::Doc(DocRef { id, label }))
    }

    fn parse_category_object(
        &mut self,
        fields: &serde_json::Map<String, Value>,
        path: &str,
    ) -> Option<NavNode> {
        let before = self.issues.len();
        self.reject_unknown_fields(fields, path, &["type", "label", "collapsed", "items"]);

        let label = match fields.get("label") {
            Some(Value::String(label)) if !label.trim().is_empty() => Some(label.clone()),
            Some(Value::String(_)) => {
                self.malformed(path, "category label must not be empty");
                None
            }
            Some(_) => {
                self.malformed(path, "`label` must be a string");
                None
            }
            None => {
                self.malformed(path, "category node is missing `label`");
                None
            }
        };

        let collapsed = match fields.get("collapsed") {
            None => false,
            Some(Value::Bool(collapsed)) => *collapsed,
            Some(_) => {
                self.malformed(path, "`collapsed` must be a boolean");
                false
            }
        };

        let entries = match fields.get("items") {
            Some(Value::Array(entries)) => {
                if entries.is_empty() {
                    self.issues.push(Issue::new(
                        self.name,
                        path,
                        IssueKind::EmptyCategory {
                            label: label.clone().unwrap_or_default(),
                        },
                    ));
                }
                Some(entries)
            }
            Some(_) => {
                self.malformed(path, "`items` must be a sequence");
                None
            }
            None => {
                self.malformed(path, "category node is missing `items`");
                None
            }
        };

        if self.issues.len() > before {
            // Children are still walked so their problems land in the same
            // report as the parent's.
            if let Some(entries) = entries {
                self.parse_items(entries, &format!("{path}.items"));
            }
            return None;
        }

        let label = label?;
        let entries = entries?;
        let items = self.parse_items(entries, &format!("{path}.items"));
        Some(NavNode::Category(Category {
            label,
            collapsed,
            items,
        }))
    }

    fn record_doc_id(&mut self, id: &str, path: &str) {
        if !self.seen_ids.insert(id.to_owned()) {
            self.issues.push(Issue::new(
                self.name,
                path,
                IssueKind::DuplicateId { id: id.to_owned() },
            ));
        }
    }

    fn reject_unknown_fields(
        &mut self,
        fields: &serde_json::Map<String, Value>,
        path: &str,
        known: &[&str],
    ) {
        for key in fields.keys() {
            if !known.contains(&key.as_str()) {
                self.malformed(path, format!("unknown field `{key}`"));
            }
        }
    }

    fn malformed(&mut self, path: &str, reason: impl Into<String>) {
        self.issues.push(Issue::new(
            self.name,
            path,
            IssueKind::MalformedNode {
                reason: reason.into(),
            },
        ));
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
