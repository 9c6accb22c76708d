//! Headless state core for a three-pane markdown editor.
//!
//! - [`FilePanel`] lists files and filters them by name.
//! - [`EditorPanel`] switches between edit, preview and diff tabs and tracks
//!   unsaved edits.
//! - [`AssistantPanel`] keeps the chat transcript and schedules replies.
//! - [`Layout`] owns the selected file and its content and wires the panels
//!   together.
//!
//! Content and replies come from the [`ContentProvider`] and
//! [`AssistantProvider`] seams; the built-in implementations are mocks.

pub mod assistant;
pub mod command;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod file_panel;
pub mod layout;
pub mod render;

pub use assistant::{
    AssistantPanel, AssistantProvider, Author, CannedAssistant, ChatMessage, MessageId,
    ProviderError, Transcript, TranscriptUpdate,
};
pub use command::{Command, ParseCommandError};
pub use config::{Config, ConfigError};
pub use content::{ContentProvider, TemplateContent};
pub use editor::{DiffEntry, DiffKind, EditorPanel, EditorTab, EditorView, SAMPLE_DIFF};
pub use error::{Error, Result};
pub use file_panel::{filter, mock_entries, EntryKind, FileEntry, FilePanel};
pub use layout::{Flow, Layout, LayoutBuilder};
