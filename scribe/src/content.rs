//! Document content seam.
//!
//! The layout asks a [`ContentProvider`] for the text of a file whenever one is
//! selected. The only provider here is [`TemplateContent`], which derives a
//! placeholder document from the file name; a storage or VCS backed provider
//! would slot in behind the same trait.

/// Source of document text for a selected file.
pub trait ContentProvider: Send + Sync {
    /// Full text of `name`. Called on every selection; the result replaces the
    /// current document wholesale.
    fn content(&self, name: &str) -> String;
}

/// Deterministic placeholder text: a heading with the file name and a stub line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateContent;

impl ContentProvider for TemplateContent {
    fn content(&self, name: &str) -> String {
        format!("# {name}\n\nContent of {name}...")
    }
}
