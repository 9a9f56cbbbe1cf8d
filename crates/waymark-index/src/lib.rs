//! Document index for navigation building.
//!
//! A documentation site's navigation refers to documents by id. The index is
//! the registry those ids resolve against: it answers whether an id exists
//! and what the document's default title is. [`FsDocIndex`] builds the
//! registry by scanning a Markdown source tree; [`InMemoryDocIndex`] backs
//! tests and embedders that already know their document set.
//!
//! # Document ids
//!
//! Ids are slash-separated paths relative to the document root, without the
//! file extension: `userguide/workspace`, `cheatsheet/cheatsheet`. This is
//! exactly the form navigation nodes use to reference documents.

pub(crate) mod fs;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub use fs::FsDocIndex;

/// Error from building a document index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The document root directory does not exist.
    #[error("Document root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A directory could not be read while scanning.
    #[error("Failed to scan {}: {source}", .path.display())]
    Io {
        /// Directory that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Lookup capability over a document collection.
///
/// The navigation builder consumes only this capability: existence checks
/// while resolving references, and default titles while rendering. Where the
/// documents actually live is the implementation's concern.
pub trait DocIndex: Send + Sync {
    /// Whether a document with this id exists.
    fn has(&self, id: &str) -> bool;

    /// The document's default title, or `None` if the id is unknown.
    fn title_of(&self, id: &str) -> Option<String>;

    /// All known document ids, sorted.
    fn ids(&self) -> Vec<String>;
}

/// Index over a fixed id-to-title map.
///
/// Useful in tests and for embedders whose document set comes from somewhere
/// other than a filesystem scan.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocIndex {
    titles: HashMap<String, String>,
}

impl InMemoryDocIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(id, title)` pairs.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let titles = pairs
            .into_iter()
            .map(|(id, title)| (id.into(), title.into()))
            .collect();
        Self { titles }
    }

    /// Register a document. An existing title for the same id is replaced.
    pub fn insert(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(id.into(), title.into());
    }

    /// Number of documents in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the index holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl DocIndex for InMemoryDocIndex {
    fn has(&self, id: &str) -> bool {
        self.titles.contains_key(id)
    }

    fn title_of(&self, id: &str) -> Option<String> {
        self.titles.get(id).cloned()
    }

    fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.titles.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // InMemoryDocIndex tests

    #[test]
    fn test_empty_index() {
        let index = InMemoryDocIndex::new();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(!index.has("anything"));
        assert!(index.title_of("anything").is_none());
        assert!(index.ids().is_empty());
    }

    #[test]
    fn test_from_pairs() {
        let index = InMemoryDocIndex::from_pairs([
            ("userguide/README", "User Guide"),
            ("userguide/workspace", "Workspace"),
        ]);

        assert_eq!(index.len(), 2);
        assert!(index.has("userguide/README"));
        assert_eq!(
            index.title_of("userguide/workspace"),
            Some("Workspace".to_owned())
        );
    }

    #[test]
    fn test_insert_replaces_title() {
        let mut index = InMemoryDocIndex::new();
        index.insert("guide", "Draft");
        index.insert("guide", "Guide");

        assert_eq!(index.len(), 1);
        assert_eq!(index.title_of("guide"), Some("Guide".to_owned()));
    }

    #[test]
    fn test_ids_sorted() {
        let index = InMemoryDocIndex::from_pairs([("c", "C"), ("a", "A"), ("b", "B")]);

        assert_eq!(index.ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_id() {
        let index = InMemoryDocIndex::from_pairs([("a", "A")]);

        assert!(!index.has("b"));
        assert!(index.title_of("b").is_none());
    }

    // Trait object tests

    #[test]
    fn test_usable_as_trait_object() {
        let index: Box<dyn DocIndex> = Box::new(InMemoryDocIndex::from_pairs([("a", "A")]));

        assert!(index.has("a"));
        assert_eq!(index.title_of("a"), Some("A".to_owned()));
    }

    #[test]
    fn test_index_error_display() {
        let err = IndexError::RootNotFound(PathBuf::from("/missing/docs"));

        assert_eq!(err.to_string(), "Document root not found: /missing/docs");
    }
}
