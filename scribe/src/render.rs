//! Plain-text rendering of the three panes.
//!
//! Each pane renders to a list of lines; [`layout`] stacks them under section
//! rules. Nothing here interprets markdown: the preview prints content as-is.

use crate::{
    assistant::{AssistantPanel, ChatMessage},
    editor::{EditorTab, EditorView},
    file_panel::{EntryKind, FilePanel},
    layout::Layout,
};

const RULE_WIDTH: usize = 60;

fn rule(title: &str) -> String {
    let head = format!("── {title} ");
    let fill = RULE_WIDTH.saturating_sub(head.chars().count());
    format!("{head}{}", "─".repeat(fill))
}

/// File list with the search box, folder/file markers and sizes. `*` marks the
/// selected file.
pub fn files(panel: &FilePanel, selected: Option<&str>) -> Vec<String> {
    let mut lines = vec![format!("Search: {}", panel.query())];
    let visible = panel.visible();
    if visible.is_empty() {
        lines.push("  (no matching files)".to_string());
    }

    for entry in visible {
        let marker = if entry.is_file() && selected == Some(entry.name.as_str()) {
            '*'
        } else {
            ' '
        };
        let icon = match entry.kind {
            EntryKind::File => "[f]",
            EntryKind::Folder => "[d]",
        };
        match &entry.display_size {
            Some(size) if !size.is_empty() => {
                lines.push(format!("{marker} {icon} {}  ({size})", entry.name))
            },
            _ => lines.push(format!("{marker} {icon} {}", entry.name)),
        }
    }
    lines
}

fn tab_strip(active: EditorTab) -> String {
    EditorTab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn header(file: &str, dirty: bool) -> String {
    let marker = if dirty { " ●" } else { "" };
    let save = if dirty { "[Save]" } else { "(Save)" };
    format!("{file}{marker}    {save}")
}

pub fn editor(view: &EditorView<'_>) -> Vec<String> {
    match view {
        EditorView::Placeholder => vec![
            "No File Selected".to_string(),
            "Choose a file from the panel to start editing".to_string(),
        ],
        EditorView::Edit {
            file,
            content,
            dirty,
        } => {
            let mut lines = vec![header(file, *dirty), tab_strip(EditorTab::Edit)];
            if content.is_empty() {
                lines.push("Start writing your markdown...".to_string());
            } else {
                lines.extend(content.lines().map(str::to_string));
            }
            lines
        },
        EditorView::Preview {
            file,
            content,
            dirty,
        } => {
            let mut lines = vec![
                header(file, *dirty),
                tab_strip(EditorTab::Preview),
                format!("Preview of {file}"),
                "This would show the rendered markdown content...".to_string(),
            ];
            lines.extend(content.lines().map(|line| format!("  | {line}")));
            lines
        },
        EditorView::Diff {
            file,
            entries,
            dirty,
        } => {
            let mut lines = vec![
                header(file, *dirty),
                tab_strip(EditorTab::Diff),
                "AI Changes    [Accept All] [Reject All]".to_string(),
            ];
            for (index, entry) in entries.iter().enumerate() {
                lines.push(format!(
                    "{index}: Line {} ({})",
                    entry.line_number,
                    entry.kind.label()
                ));
                lines.push(format!("   {}", entry.text));
            }
            lines
        },
    }
}

fn message(msg: &ChatMessage) -> Vec<String> {
    let mut head = format!("#{} {}", msg.id, msg.author.label());
    if let Some(file) = &msg.file_context {
        head.push_str(&format!(" [{file}]"));
    }
    let mut lines = vec![head];
    lines.extend(msg.text.lines().map(|line| format!("  {line}")));
    if msg.is_assistant() {
        lines.push("  [Copy] [+] [-]".to_string());
    }
    lines
}

pub fn assistant(panel: &AssistantPanel, selected: Option<&str>) -> Vec<String> {
    let mut lines = vec![match selected {
        Some(file) => format!("AI Assistant    {file}"),
        None => "AI Assistant".to_string(),
    }];
    for msg in panel.messages() {
        lines.extend(message(&msg));
    }

    let send = if panel.can_send() { "[Send]" } else { "(Send)" };
    if panel.draft().is_empty() {
        lines.push(format!("> Ask AI about your document...  {send}"));
    } else {
        lines.push(format!("> {}  {send}", panel.draft()));
    }
    lines.push("AI can make mistakes. Verify important information.".to_string());
    lines
}

/// Lines for a single message arriving after the fact.
pub fn arrival(msg: &ChatMessage) -> String {
    message(msg).join("\n")
}

/// All three panes, top to bottom.
pub fn layout(layout: &Layout) -> String {
    let selected = layout.selected_file();
    let mut lines = vec![rule("Files")];
    lines.extend(files(layout.files(), selected));
    lines.push(rule("Editor"));
    lines.extend(editor(&layout.editor_view()));
    lines.push(rule("Assistant"));
    lines.extend(assistant(layout.assistant(), selected));
    lines.join("\n")
}
