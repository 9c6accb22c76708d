use clap::{Parser, Subcommand};
use scribe::Config;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scribe", version, about = "A three-pane markdown editor shell")]
pub struct Cli {
    /// TOML file with session settings
    #[arg(long, env = "SCRIBE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log file, or directory to write `scribe-<pid>.log` in
    #[arg(long, env = "SCRIBE_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Milliseconds before the assistant replies
    #[arg(long, env = "SCRIBE_REPLY_DELAY_MS", global = true)]
    pub reply_delay_ms: Option<u64>,

    /// Start with an empty chat transcript
    #[arg(long, global = true)]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive editor shell (default)
    Shell,
    /// Print the file list, optionally filtered
    Files { query: Option<String> },
}

impl Cli {
    /// Config file values with command-line overrides applied.
    pub fn resolve_config(&self) -> scribe::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(delay) = self.reply_delay_ms {
            config.reply_delay_ms = delay;
        }
        if self.no_seed {
            config.seed_transcript = false;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::parse_from(["scribe"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.resolve_config().expect("config"), Config::default());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "reply_delay_ms = 5\nseed_transcript = true").expect("write");

        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "scribe",
            "--config",
            path.as_str(),
            "--reply-delay-ms",
            "20",
            "--no-seed",
        ]);
        let config = cli.resolve_config().expect("config");
        assert_eq!(config.reply_delay_ms, 20);
        assert!(!config.seed_transcript);
    }

    #[test]
    fn parses_files_subcommand() {
        let cli = Cli::parse_from(["scribe", "files", "notes"]);
        match cli.command {
            Some(Command::Files { query }) => assert_eq!(query.as_deref(), Some("notes")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["scribe", "--config", "/no/such/scribe.toml"]);
        assert!(matches!(
            cli.resolve_config(),
            Err(scribe::Error::Config { .. })
        ));
    }
}
