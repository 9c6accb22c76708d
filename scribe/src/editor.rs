//! Editor panel view state.
//!
//! The panel switches between three exclusive tabs and tracks whether the
//! document has unsaved edits. It does not own the document text: edits are
//! handed back to the caller (the layout), which holds the current content.
//!
//! # Tabs
//!
//! - [`EditorTab::Edit`] accepts input; every change marks the document dirty.
//! - [`EditorTab::Preview`] shows the raw content under a heading. No markdown
//!   rendering happens.
//! - [`EditorTab::Diff`] lists [`SAMPLE_DIFF`], a fixed illustration that is
//!   not computed from anything. Its accept and reject controls are inert.
//!
//! Tab changes never touch the content or the dirty flag.

use snafu::Snafu;
use std::{fmt, str::FromStr};
use tracing::{debug, info, trace};

/// The three editor views. Starts in [`EditorTab::Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    #[default]
    Edit,
    Preview,
    Diff,
}

impl EditorTab {
    pub const ALL: [EditorTab; 3] = [EditorTab::Edit, EditorTab::Preview, EditorTab::Diff];

    pub fn name(&self) -> &'static str {
        match self {
            EditorTab::Edit => "edit",
            EditorTab::Preview => "preview",
            EditorTab::Diff => "diff",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EditorTab::Edit => "Edit",
            EditorTab::Preview => "Preview",
            EditorTab::Diff => "Diff",
        }
    }
}

impl fmt::Display for EditorTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditorTab::ALL
            .into_iter()
            .find(|tab| tab.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTab { name: s.to_string() })
    }
}

/// Returned when a tab name does not match any [`EditorTab`].
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("unknown tab '{name}', expected edit, preview or diff"))]
pub struct UnknownTab {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Added,
    Removed,
    Modified,
}

impl DiffKind {
    pub fn label(&self) -> &'static str {
        match self {
            DiffKind::Added => "added",
            DiffKind::Removed => "removed",
            DiffKind::Modified => "modified",
        }
    }
}

/// One illustrative line in the diff tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEntry {
    pub kind: DiffKind,
    pub line_number: u32,
    pub text: &'static str,
}

pub const SAMPLE_DIFF: [DiffEntry; 3] = [
    DiffEntry {
        kind: DiffKind::Added,
        line_number: 15,
        text: "+ This is a new line added by AI",
    },
    DiffEntry {
        kind: DiffKind::Removed,
        line_number: 18,
        text: "- This line was removed",
    },
    DiffEntry {
        kind: DiffKind::Modified,
        line_number: 22,
        text: "~ This line was modified by AI assistant",
    },
];

/// What the editor panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorView<'a> {
    /// No file is open; the tab strip is not shown.
    Placeholder,
    Edit {
        file: &'a str,
        content: &'a str,
        dirty: bool,
    },
    Preview {
        file: &'a str,
        content: &'a str,
        dirty: bool,
    },
    Diff {
        file: &'a str,
        entries: &'static [DiffEntry],
        dirty: bool,
    },
}

impl EditorView<'_> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, EditorView::Placeholder)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorPanel {
    tab: EditorTab,
    dirty: bool,
}

impl EditorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: EditorTab) {
        if self.tab != tab {
            trace!(from = %self.tab, to = %tab, "switching editor tab");
        }
        self.tab = tab;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Save is only enabled while there are unsaved edits.
    pub fn can_save(&self) -> bool {
        self.dirty
    }

    /// Accept a content change from the edit area.
    ///
    /// Returns the new content for the owner to store, or `None` when the edit
    /// area is not on screen (no file open, or another tab active).
    pub fn input(&mut self, selected: Option<&str>, new_content: String) -> Option<String> {
        if selected.is_none() {
            debug!("ignoring input with no file open");
            return None;
        }
        if self.tab != EditorTab::Edit {
            debug!(tab = %self.tab, "ignoring input outside the edit tab");
            return None;
        }

        self.dirty = true;
        Some(new_content)
    }

    /// Clear the dirty flag. Nothing is written anywhere.
    ///
    /// Returns `false` without doing anything when there is nothing to save.
    pub fn save(&mut self) -> bool {
        if !self.dirty {
            debug!("save ignored; no unsaved changes");
            return false;
        }
        self.dirty = false;
        info!("document saved");
        true
    }

    pub fn accept_all(&self) {
        debug!("accept all diff entries requested; diff is illustrative only");
    }

    pub fn reject_all(&self) {
        debug!("reject all diff entries requested; diff is illustrative only");
    }

    pub fn accept(&self, index: usize) {
        debug!(index, "accept diff entry requested; diff is illustrative only");
    }

    pub fn reject(&self, index: usize) {
        debug!(index, "reject diff entry requested; diff is illustrative only");
    }

    pub fn diff_entries(&self) -> &'static [DiffEntry] {
        &SAMPLE_DIFF
    }

    /// Resolve what to show for the given selection and content.
    pub fn view<'a>(&self, selected: Option<&'a str>, content: &'a str) -> EditorView<'a> {
        let Some(file) = selected else {
            return EditorView::Placeholder;
        };
        let dirty = self.dirty;

        match self.tab {
            EditorTab::Edit => EditorView::Edit {
                file,
                content,
                dirty,
            },
            EditorTab::Preview => EditorView::Preview {
                file,
                content,
                dirty,
            },
            EditorTab::Diff => EditorView::Diff {
                file,
                entries: &SAMPLE_DIFF,
                dirty,
            },
        }
    }
}
