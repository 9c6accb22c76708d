//! File list panel.
//!
//! Presents a fixed list of [`FileEntry`] values, narrows it with a
//! case-insensitive substring query and turns clicks into selection events.
//! The list itself is never mutated: delete is wired but inert.

use serde::Deserialize;
use tracing::debug;

/// Whether an entry opens in the editor or is a (non-navigable) folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// A single row of the file list. Names are unique within a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
    #[serde(default, rename = "size")]
    pub display_size: Option<String>,
}

impl FileEntry {
    pub fn file(name: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            display_size: Some(size.into()),
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Folder,
            display_size: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// The built-in mock file list.
pub fn mock_entries() -> Vec<FileEntry> {
    vec![
        FileEntry::file("README.md", "2.1 KB"),
        FileEntry::file("project-notes.md", "5.3 KB"),
        FileEntry::folder("docs"),
        FileEntry::file("api-spec.md", "12.8 KB"),
        FileEntry::file("meeting-notes.md", "3.2 KB"),
        FileEntry::file("draft-article.md", "8.7 KB"),
    ]
}

/// Entries whose name contains `query`, ignoring case, in list order.
///
/// An empty query keeps every entry. Filtering an already filtered list with
/// the same query returns it unchanged.
pub fn filter(entries: &[FileEntry], query: &str) -> Vec<FileEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// File panel view state: the entry list plus the current search query.
#[derive(Debug, Clone)]
pub struct FilePanel {
    entries: Vec<FileEntry>,
    query: String,
}

impl Default for FilePanel {
    fn default() -> Self {
        Self::new(mock_entries())
    }
}

impl FilePanel {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self {
            entries,
            query: String::new(),
        }
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Entries currently displayed under the active query.
    pub fn visible(&self) -> Vec<FileEntry> {
        filter(&self.entries, &self.query)
    }

    /// Handle a click on a displayed entry.
    ///
    /// Returns the name to select for file entries. Folders and names that
    /// are not on screen yield `None`.
    pub fn click(&self, name: &str) -> Option<String> {
        let visible = self.visible();
        let Some(entry) = visible.iter().find(|entry| entry.name == name) else {
            debug!(name, "click on entry that is not displayed");
            return None;
        };

        if !entry.is_file() {
            debug!(name, "folder navigation is not supported");
            return None;
        }

        Some(entry.name.clone())
    }

    /// Delete is wired to the UI but does not touch the list.
    pub fn delete(&mut self, name: &str) {
        debug!(name, "delete requested; file list is read-only");
    }
}
