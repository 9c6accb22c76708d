//! Session configuration.
//!
//! Read from an optional TOML file; every field has a default so an empty file
//! (or no file at all) yields [`Config::default`].
//!
//! ```toml
//! reply_delay_ms = 250
//! seed_transcript = false
//!
//! [[files]]
//! name = "notes.md"
//! kind = "file"
//! size = "1.0 KB"
//! ```

use crate::file_panel::FileEntry;
use serde::Deserialize;
use snafu::{ResultExt, Snafu};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tokio::time::Duration;

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read config file {}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to parse config file {}", path.display()))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("File list in {} names '{name}' more than once", path.display()))]
    DuplicateEntry { path: PathBuf, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pause before the canned assistant answers.
    pub reply_delay_ms: u64,
    /// Start the transcript with the introductory turns.
    pub seed_transcript: bool,
    /// Replaces the built-in file list when set.
    pub files: Option<Vec<FileEntry>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            seed_transcript: true,
            files: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).context(ReadSnafu { path })?;
        let config = Self::parse(&text).context(ParseSnafu { path })?;
        if let Some(name) = config.duplicate_entry() {
            return DuplicateEntrySnafu { path, name }.fail();
        }
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// First file list name that appears more than once, if any.
    pub fn duplicate_entry(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.files
            .iter()
            .flatten()
            .map(|entry| entry.name.as_str())
            .find(|name| !seen.insert(*name))
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_panel::EntryKind;
    use std::io::Write;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(Config::parse("").expect("empty config"), Config::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::parse(
            r#"
            reply_delay_ms = 250
            seed_transcript = false

            [[files]]
            name = "notes.md"
            kind = "file"
            size = "1.0 KB"

            [[files]]
            name = "assets"
            kind = "folder"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.reply_delay(), Duration::from_millis(250));
        assert!(!config.seed_transcript);
        let files = config.files.expect("files override");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], FileEntry::file("notes.md", "1.0 KB"));
        assert_eq!(files[1].kind, EntryKind::Folder);
        assert_eq!(files[1].display_size, None);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "reply_delay_ms = 10").expect("write config");

        let config = Config::load(file.path()).expect("load config");
        assert_eq!(config.reply_delay_ms, 10);
        assert!(config.seed_transcript);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "reply_delay_ms = \"soon\"").expect("write config");

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_reports_duplicate_entries() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"
            [[files]]
            name = "a.md"
            kind = "file"

            [[files]]
            name = "a.md"
            kind = "folder"
            "#
        )
        .expect("write config");

        let err = Config::load(file.path()).unwrap_err();
        match err {
            ConfigError::DuplicateEntry { name, .. } => assert_eq!(name, "a.md"),
            other => panic!("expected duplicate entry, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_entry_finds_first_repeat() {
        let mut config = Config::default();
        assert_eq!(config.duplicate_entry(), None);

        config.files = Some(vec![
            FileEntry::file("a.md", "1 KB"),
            FileEntry::folder("docs"),
            FileEntry::file("b.md", "2 KB"),
        ]);
        assert_eq!(config.duplicate_entry(), None);

        config.files = Some(vec![
            FileEntry::file("a.md", "1 KB"),
            FileEntry::folder("docs"),
            FileEntry::file("docs", "2 KB"),
        ]);
        assert_eq!(config.duplicate_entry(), Some("docs"));
    }
}
