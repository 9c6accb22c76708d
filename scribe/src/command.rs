//! Line-oriented command language for driving a [`Layout`](crate::Layout).
//!
//! Each line is one command: a verb followed by an optional argument. Text
//! arguments accept `\n` and `\t` escapes so multi-line documents can be typed
//! on a single line.

use crate::{
    assistant::MessageId,
    editor::{EditorTab, UnknownTab},
};
use snafu::{ResultExt, Snafu};
use std::str::FromStr;

#[derive(Debug, Snafu)]
pub enum ParseCommandError {
    #[snafu(display("Empty command"))]
    Empty,

    #[snafu(display("Unknown command '{name}', try 'help'"))]
    Unknown { name: String },

    #[snafu(display("'{command}' needs an argument"))]
    MissingArgument { command: &'static str },

    #[snafu(display("Invalid tab"))]
    Tab { source: UnknownTab },

    #[snafu(display("Invalid diff entry index '{value}'"))]
    Index {
        value: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("Invalid message id '{value}'"))]
    Message {
        value: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("Invalid rating '{value}', expected 'up' or 'down'"))]
    Rating { value: String },
}

/// A single user operation on the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the file search query; no argument clears it
    Search(String),
    /// Click a file list entry
    Open(String),
    /// Delete a file list entry (inert)
    Delete(String),
    /// Switch the editor tab
    Tab(EditorTab),
    /// Replace the document content
    Write(String),
    /// Append to the document content
    Append(String),
    /// Save the document
    Save,
    /// Accept one diff entry, or all of them
    Accept(Option<usize>),
    /// Reject one diff entry, or all of them
    Reject(Option<usize>),
    /// Replace the assistant draft
    Draft(String),
    /// Send text to the assistant; `None` sends the draft
    Send(Option<String>),
    /// Copy an assistant message (inert)
    Copy(MessageId),
    /// Rate an assistant message up or down (inert)
    Rate { id: MessageId, helpful: bool },
    /// Re-render every pane
    Show,
    Help,
    Quit,
}

impl Command {
    /// Usage lines shown by `help`.
    pub const USAGE: &'static [(&'static str, &'static str)] = &[
        ("search [QUERY]", "filter the file list"),
        ("open NAME", "open a file"),
        ("delete NAME", "delete a file (not supported)"),
        ("tab edit|preview|diff", "switch editor tab"),
        ("write TEXT", "replace the document"),
        ("append TEXT", "append to the document"),
        ("save", "save the document"),
        ("accept [N] | accept-all", "accept AI changes"),
        ("reject [N] | reject-all", "reject AI changes"),
        ("draft TEXT", "set the assistant input"),
        ("send [TEXT]", "send TEXT, or the draft, to the assistant"),
        ("copy N", "copy message N (not supported)"),
        ("rate N up|down", "rate message N (not supported)"),
        ("show", "redraw all panes"),
        ("help", "show this help"),
        ("quit", "exit"),
    ];

    /// Whether the panes should be redrawn after this command runs.
    pub fn redraws(&self) -> bool {
        !matches!(self, Command::Help | Command::Quit)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line.trim_end(), ""),
        };

        let required = |command: &'static str| {
            if rest.is_empty() {
                MissingArgumentSnafu { command }.fail()
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match verb {
            "" => return EmptySnafu.fail(),
            "search" | "find" => Command::Search(rest.to_string()),
            "open" => Command::Open(required("open")?),
            "delete" | "rm" => Command::Delete(required("delete")?),
            "tab" => Command::Tab(required("tab")?.parse().context(TabSnafu)?),
            "edit" | "preview" | "diff" => Command::Tab(verb.parse().context(TabSnafu)?),
            "write" => Command::Write(unescape(rest)),
            "append" => Command::Append(unescape(required("append")?.as_str())),
            "save" => Command::Save,
            "accept" => Command::Accept(parse_index(rest)?),
            "reject" => Command::Reject(parse_index(rest)?),
            "accept-all" => Command::Accept(None),
            "reject-all" => Command::Reject(None),
            "draft" => Command::Draft(unescape(rest)),
            "send" => Command::Send((!rest.is_empty()).then(|| unescape(rest))),
            "copy" => Command::Copy(parse_message_id(&required("copy")?)?),
            "rate" => {
                let args = required("rate")?;
                let (id, rating) = args
                    .split_once(char::is_whitespace)
                    .map(|(id, rating)| (id, rating.trim()))
                    .unwrap_or((args.as_str(), ""));
                let helpful = match rating {
                    "up" | "+" => true,
                    "down" | "-" => false,
                    "" => return MissingArgumentSnafu { command: "rate" }.fail(),
                    other => {
                        return RatingSnafu {
                            value: other.to_string(),
                        }
                        .fail();
                    },
                };
                Command::Rate {
                    id: parse_message_id(id)?,
                    helpful,
                }
            },
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return UnknownSnafu {
                    name: other.to_string(),
                }
                .fail();
            },
        };

        Ok(command)
    }
}

fn parse_index(value: &str) -> Result<Option<usize>, ParseCommandError> {
    if value.is_empty() {
        return Ok(None);
    }
    let index = value.parse::<usize>().context(IndexSnafu { value })?;
    Ok(Some(index))
}

fn parse_message_id(value: &str) -> Result<MessageId, ParseCommandError> {
    let id = value.parse::<u64>().context(MessageSnafu { value })?;
    Ok(MessageId(id))
}

/// Expand `\n`, `\t` and `\\`. Unknown escapes are kept as written.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap_or_else(|e| panic!("{line:?}: {e}"))
    }

    #[test]
    fn parses_file_commands() {
        assert_eq!(parse("search notes"), Command::Search("notes".into()));
        assert_eq!(parse("search"), Command::Search(String::new()));
        assert_eq!(parse("open README.md"), Command::Open("README.md".into()));
        assert_eq!(parse("delete docs"), Command::Delete("docs".into()));
    }

    #[test]
    fn parses_editor_commands() {
        assert_eq!(parse("tab preview"), Command::Tab(EditorTab::Preview));
        assert_eq!(parse("diff"), Command::Tab(EditorTab::Diff));
        assert_eq!(parse("write # Title\\n\\nbody"), Command::Write("# Title\n\nbody".into()));
        assert_eq!(parse("write"), Command::Write(String::new()));
        assert_eq!(parse("append more"), Command::Append("more".into()));
        assert_eq!(parse("save"), Command::Save);
        assert_eq!(parse("accept"), Command::Accept(None));
        assert_eq!(parse("accept-all"), Command::Accept(None));
        assert_eq!(parse("reject 2"), Command::Reject(Some(2)));
    }

    #[test]
    fn parses_assistant_commands() {
        assert_eq!(parse("send fix grammar"), Command::Send(Some("fix grammar".into())));
        assert_eq!(parse("send"), Command::Send(None));
        assert_eq!(parse("draft  hello "), Command::Draft("hello".into()));
        assert_eq!(parse("  quit  "), Command::Quit);
        assert_eq!(parse("copy 3"), Command::Copy(MessageId(3)));
        assert_eq!(
            parse("rate 3 up"),
            Command::Rate {
                id: MessageId(3),
                helpful: true
            }
        );
        assert_eq!(
            parse("rate 5  -"),
            Command::Rate {
                id: MessageId(5),
                helpful: false
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!("".parse::<Command>(), Err(ParseCommandError::Empty)));
        assert!(matches!(
            "frobnicate".parse::<Command>(),
            Err(ParseCommandError::Unknown { .. })
        ));
        assert!(matches!(
            "open".parse::<Command>(),
            Err(ParseCommandError::MissingArgument { command: "open" })
        ));
        assert!(matches!(
            "tab split".parse::<Command>(),
            Err(ParseCommandError::Tab { .. })
        ));
        assert!(matches!(
            "accept one".parse::<Command>(),
            Err(ParseCommandError::Index { .. })
        ));
        assert!(matches!(
            "copy".parse::<Command>(),
            Err(ParseCommandError::MissingArgument { command: "copy" })
        ));
        assert!(matches!(
            "copy last".parse::<Command>(),
            Err(ParseCommandError::Message { .. })
        ));
        assert!(matches!(
            "rate 3".parse::<Command>(),
            Err(ParseCommandError::MissingArgument { command: "rate" })
        ));
        assert!(matches!(
            "rate 3 meh".parse::<Command>(),
            Err(ParseCommandError::Rating { .. })
        ));
        assert!(matches!(
            "rate x up".parse::<Command>(),
            Err(ParseCommandError::Message { .. })
        ));
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape("a\\qb\\"), "a\\qb\\");
        assert_eq!(unescape("tab\\there"), "tab\there");
        assert_eq!(unescape("back\\\\slash"), "back\\slash");
    }
}
