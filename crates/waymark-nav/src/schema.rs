//! Sidebars document schema revisions.
//!
//! The sidebar format evolved over time; instead of guessing which shape a
//! document uses, the document declares its revision explicitly through an
//! envelope:
//!
//! ```json
//! { "schema": 1, "sidebars": { "mainSidebar": { "Basics": ["doc-a"] } } }
//! ```
//!
//! A document without an envelope (no `schema`/`sidebars` keys at the top
//! level) is read as the current revision.

use serde_json::Value;

use crate::error::SidebarError;

/// Revision of the sidebars document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaRevision {
    /// Revision 1: each sidebar is a mapping from category label to item
    /// list. Every pair becomes a top-level expanded category, in map
    /// order.
    Legacy,
    /// Revision 2: each sidebar is an ordered sequence of nodes.
    #[default]
    Current,
}

impl SchemaRevision {
    /// Revision for a declared `schema` number.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::UnsupportedSchema`] for numbers other than
    /// 1 and 2.
    pub fn from_number(number: u64) -> Result<Self, SidebarError> {
        match number {
            1 => Ok(SchemaRevision::Legacy),
            2 => Ok(SchemaRevision::Current),
            other => Err(SidebarError::UnsupportedSchema(other)),
        }
    }

    /// The declared `schema` number for this revision.
    #[must_use]
    pub fn number(self) -> u64 {
        match self {
            SchemaRevision::Legacy => 1,
            SchemaRevision::Current => 2,
        }
    }
}

/// Split a parsed document into its revision and the sidebars mapping.
///
/// A top-level mapping containing a `schema` or `sidebars` key is treated as
/// an envelope; anything else is a bare sidebars mapping at the current
/// revision.
pub(crate) fn split_envelope(doc: &Value) -> Result<(SchemaRevision, &Value), SidebarError> {
    let Value::Object(map) = doc else {
        return Err(SidebarError::Document(
            "expected a mapping of sidebar names at the top level".to_owned(),
        ));
    };

    if !map.contains_key("schema") && !map.contains_key("sidebars") {
        return Ok((SchemaRevision::default(), doc));
    }

    let revision = match map.get("schema") {
        None => SchemaRevision::default(),
        Some(value) => {
            let number = value.as_u64().ok_or_else(|| {
                SidebarError::Document("`schema` must be an integer revision number".to_owned())
            })?;
            SchemaRevision::from_number(number)?
        }
    };

    if let Some(extra) = map.keys().find(|key| *key != "schema" && *key != "sidebars") {
        return Err(SidebarError::Document(format!(
            "unexpected envelope key `{extra}`"
        )));
    }

    let sidebars = map.get("sidebars").ok_or_else(|| {
        SidebarError::Document("envelope is missing the `sidebars` mapping".to_owned())
    })?;

    Ok((revision, sidebars))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_revision_numbers() {
        assert_eq!(SchemaRevision::Legacy.number(), 1);
        assert_eq!(SchemaRevision::Current.number(), 2);
        assert_eq!(
            SchemaRevision::from_number(1).unwrap(),
            SchemaRevision::Legacy
        );
        assert_eq!(
            SchemaRevision::from_number(2).unwrap(),
            SchemaRevision::Current
        );
    }

    #[test]
    fn test_unsupported_revision() {
        let err = SchemaRevision::from_number(3).unwrap_err();

        assert!(matches!(err, SidebarError::UnsupportedSchema(3)));
    }

    #[test]
    fn test_default_is_current() {
        assert_eq!(SchemaRevision::default(), SchemaRevision::Current);
    }

    // Envelope tests

    #[test]
    fn test_bare_mapping() {
        let doc = json!({"userguide": []});

        let (revision, sidebars) = split_envelope(&doc).unwrap();

        assert_eq!(revision, SchemaRevision::Current);
        assert_eq!(sidebars, &doc);
    }

    #[test]
    fn test_envelope_with_schema() {
        let doc = json!({"schema": 1, "sidebars": {"main": {}}});

        let (revision, sidebars) = split_envelope(&doc).unwrap();

        assert_eq!(revision, SchemaRevision::Legacy);
        assert_eq!(sidebars, &json!({"main": {}}));
    }

    #[test]
    fn test_envelope_without_schema_defaults_current() {
        let doc = json!({"sidebars": {"main": []}});

        let (revision, _) = split_envelope(&doc).unwrap();

        assert_eq!(revision, SchemaRevision::Current);
    }

    #[test]
    fn test_envelope_unknown_revision() {
        let doc = json!({"schema": 7, "sidebars": {}});

        let err = split_envelope(&doc).unwrap_err();

        assert!(matches!(err, SidebarError::UnsupportedSchema(7)));
    }

    #[test]
    fn test_envelope_non_integer_schema() {
        let doc = json!({"schema": "two", "sidebars": {}});

        let err = split_envelope(&doc).unwrap_err();

        assert!(matches!(err, SidebarError::Document(_)));
    }

    #[test]
    fn test_envelope_missing_sidebars() {
        let doc = json!({"schema": 2});

        let err = split_envelope(&doc).unwrap_err();

        assert!(matches!(err, SidebarError::Document(_)));
    }

    #[test]
    fn test_envelope_extra_key() {
        let doc = json!({"schema": 2, "sidebars": {}, "theme": "dark"});

        let err = split_envelope(&doc).unwrap_err();

        let SidebarError::Document(message) = err else {
            panic!("expected document error");
        };
        assert!(message.contains("theme"));
    }

    #[test]
    fn test_top_level_sequence_rejected() {
        let doc = json!([1, 2, 3]);

        let err = split_envelope(&doc).unwrap_err();

        assert!(matches!(err, SidebarError::Document(_)));
    }
}
