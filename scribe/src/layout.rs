//! The layout: owner of the selected file and its content.
//!
//! State flows one way. The layout hands the selection to the file panel and
//! the selection plus content to the editor and assistant panels. The only
//! value flowing back up is edited content, which the editor returns from
//! [`EditorPanel::input`] and the layout stores verbatim.

use crate::{
    assistant::{
        AssistantPanel, AssistantProvider, CannedAssistant, MessageId, Transcript, TranscriptUpdate,
    },
    command::Command,
    config::Config,
    content::{ContentProvider, TemplateContent},
    editor::{EditorPanel, EditorTab, EditorView},
    file_panel::{mock_entries, FileEntry, FilePanel},
};
use std::{collections::HashSet, sync::Arc};
use tokio::{sync::broadcast, time::Duration};
use tracing::{info, warn};

/// Whether the caller should keep going after [`Layout::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Layout {
    files: FilePanel,
    editor: EditorPanel,
    assistant: AssistantPanel,
    content_provider: Arc<dyn ContentProvider>,
    selected_file: Option<String>,
    file_content: String,
}

impl Layout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::new()
    }

    /// A layout with the mock file list, template content and the canned
    /// assistant.
    pub fn new() -> Self {
        LayoutBuilder::new().build()
    }

    pub fn from_config(config: &Config) -> Self {
        LayoutBuilder::from_config(config).build()
    }

    pub fn files(&self) -> &FilePanel {
        &self.files
    }

    pub fn editor(&self) -> &EditorPanel {
        &self.editor
    }

    pub fn assistant(&self) -> &AssistantPanel {
        &self.assistant
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.file_content
    }

    pub fn editor_view(&self) -> EditorView<'_> {
        self.editor
            .view(self.selected_file.as_deref(), &self.file_content)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptUpdate> {
        self.assistant.subscribe()
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.files.set_query(query);
    }

    /// Select `name` and load its content, replacing whatever was open.
    pub fn select_file(&mut self, name: &str) {
        self.file_content = self.content_provider.content(name);
        self.selected_file = Some(name.to_string());
        info!(file = name, "file selected");
    }

    /// Route a click through the file panel. Returns whether a file was
    /// selected.
    pub fn click_file(&mut self, name: &str) -> bool {
        match self.files.click(name) {
            Some(name) => {
                self.select_file(&name);
                true
            },
            None => false,
        }
    }

    pub fn delete_file(&mut self, name: &str) {
        self.files.delete(name);
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        self.editor.select_tab(tab);
    }

    /// Replace the document content through the editor. Returns whether the
    /// edit was accepted.
    pub fn edit_content(&mut self, new_content: impl Into<String>) -> bool {
        match self
            .editor
            .input(self.selected_file.as_deref(), new_content.into())
        {
            Some(content) => {
                self.file_content = content;
                true
            },
            None => false,
        }
    }

    pub fn append_content(&mut self, text: &str) -> bool {
        let mut content = self.file_content.clone();
        content.push_str(text);
        self.edit_content(content)
    }

    pub fn save(&mut self) -> bool {
        self.editor.save()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.assistant.set_draft(text);
    }

    pub fn send_message(&mut self, text: &str) -> Option<MessageId> {
        self.assistant
            .send_message(text, self.selected_file.as_deref())
    }

    pub fn submit_draft(&mut self) -> Option<MessageId> {
        self.assistant.submit(self.selected_file.as_deref())
    }

    /// Tear down the assistant's pending replies.
    pub fn shutdown(&mut self) {
        self.assistant.shutdown();
    }

    /// Run one shell command.
    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Search(query) => self.search(query),
            Command::Open(name) => {
                self.click_file(&name);
            },
            Command::Delete(name) => self.delete_file(&name),
            Command::Tab(tab) => self.select_tab(tab),
            Command::Write(text) => {
                self.edit_content(text);
            },
            Command::Append(text) => {
                self.append_content(&text);
            },
            Command::Save => {
                self.save();
            },
            Command::Accept(Some(index)) => self.editor.accept(index),
            Command::Accept(None) => self.editor.accept_all(),
            Command::Reject(Some(index)) => self.editor.reject(index),
            Command::Reject(None) => self.editor.reject_all(),
            Command::Draft(text) => self.set_draft(text),
            Command::Send(Some(text)) => {
                self.send_message(&text);
            },
            Command::Send(None) => {
                self.submit_draft();
            },
            Command::Copy(id) => self.assistant.copy(id),
            Command::Rate { id, helpful } => self.assistant.rate(id, helpful),
            Command::Show | Command::Help => {},
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first entry for each name; the file list is keyed by name.
fn unique_entries(entries: Vec<FileEntry>) -> Vec<FileEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let first = seen.insert(entry.name.clone());
            if !first {
                warn!(name = %entry.name, "dropping duplicate file entry");
            }
            first
        })
        .collect()
}

/// Assembles a [`Layout`], swapping in providers or a custom file list.
pub struct LayoutBuilder {
    entries: Vec<FileEntry>,
    content_provider: Arc<dyn ContentProvider>,
    assistant_provider: Option<Arc<dyn AssistantProvider>>,
    reply_delay: Duration,
    seed_transcript: bool,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            entries: config
                .files
                .clone()
                .map(unique_entries)
                .unwrap_or_else(mock_entries),
            content_provider: Arc::new(TemplateContent),
            assistant_provider: None,
            reply_delay: config.reply_delay(),
            seed_transcript: config.seed_transcript,
        }
    }

    pub fn entries(mut self, entries: Vec<FileEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn content_provider(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.content_provider = provider;
        self
    }

    /// Use `provider` instead of the canned assistant. Overrides the reply
    /// delay.
    pub fn assistant_provider(mut self, provider: Arc<dyn AssistantProvider>) -> Self {
        self.assistant_provider = Some(provider);
        self
    }

    pub fn reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    pub fn seed_transcript(mut self, seed: bool) -> Self {
        self.seed_transcript = seed;
        self
    }

    pub fn build(self) -> Layout {
        let provider = self
            .assistant_provider
            .unwrap_or_else(|| Arc::new(CannedAssistant::new(self.reply_delay)));
        let transcript = if self.seed_transcript {
            Transcript::seeded()
        } else {
            Transcript::new()
        };

        Layout {
            files: FilePanel::new(self.entries),
            editor: EditorPanel::new(),
            assistant: AssistantPanel::new(provider, transcript),
            content_provider: self.content_provider,
            selected_file: None,
            file_content: String::new(),
        }
    }
}
