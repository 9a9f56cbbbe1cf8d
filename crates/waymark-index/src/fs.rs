//! Filesystem-backed document index.
//!
//! Walks a document root once, at build time, recording every Markdown file
//! and its default title. Titles come from the first H1 heading; files
//! without one fall back to a title-cased form of the filename.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::{DocIndex, IndexError};

/// Document index built from a Markdown source tree.
///
/// Every `.md`/`.mdx` file under the root becomes one document whose id is
/// the extension-less path relative to the root (`userguide/workspace.md`
/// scans as `userguide/workspace`). Hidden files and directories are
/// skipped.
#[derive(Debug)]
pub struct FsDocIndex {
    root: PathBuf,
    titles: HashMap<String, String>,
}

impl FsDocIndex {
    /// Scan `root` and build the index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::RootNotFound`] if `root` is not a directory,
    /// or [`IndexError::Io`] if a directory inside it cannot be read.
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self, IndexError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IndexError::RootNotFound(root));
        }

        let scanner = TitleScanner::new();
        let mut titles = HashMap::new();
        scanner.scan_directory(&root, "", &mut titles)?;

        tracing::debug!(
            root = %root.display(),
            documents = titles.len(),
            "Scanned document root"
        );

        Ok(Self { root, titles })
    }

    /// The document root this index was scanned from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of documents found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the scan found no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl DocIndex for FsDocIndex {
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

/// Directory walker that pairs each Markdown file with a display title.
struct TitleScanner {
    h1_regex: Regex,
}

impl TitleScanner {
    fn new() -> Self {
        Self {
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").unwrap(),
        }
    }

    fn scan_directory(
        &self,
        dir: &Path,
        id_prefix: &str,
        titles: &mut HashMap<String, String>,
    ) -> Result<(), IndexError> {
        let entries = fs::read_dir(dir).map_err(|source| IndexError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                let child_prefix = join_id(id_prefix, &name);
                self.scan_directory(&path, &child_prefix, titles)?;
            } else if is_markdown(&path) {
                let Some(stem) = path.file_stem() else {
                    continue;
                };
                let stem = stem.to_string_lossy();
                let id = join_id(id_prefix, &stem);
                let title = self.title_for(&path, &stem);
                titles.insert(id, title);
            }
        }

        Ok(())
    }

    /// First H1 in the file, or a title-cased filename when there is none.
    fn title_for(&self, path: &Path, stem: &str) -> String {
        self.extract_h1(path)
            .unwrap_or_else(|| titlecase_from_slug(&stem.to_lowercase()))
    }

    fn extract_h1(&self, path: &Path) -> Option<String> {
        let content = fs::read_to_string(path)
            .inspect_err(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read document, deriving title from filename"
                );
            })
            .ok()?;
        let caps = self.h1_regex.captures(&content)?;
        Some(caps[1].trim().to_string())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "md" || e == "mdx")
}

fn join_id(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}/{segment}")
    }
}

/// Make a display title from a slug: `setup-guide` becomes `Setup Guide`.
fn titlecase_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
