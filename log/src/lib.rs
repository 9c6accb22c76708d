//! Logging setup for Scribe with file output and optional console output.
//!
//! Logs always go to a file at `warn` level (or higher if the environment asks
//! for more). Console logging (on stderr, so the shell's stdout stays clean) is
//! enabled when `SCRIBE_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`SCRIBE_LOG`** (highest priority) - Scribe-specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for scribe crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/scribe/logs/scribe-<pid>.log`
//! - macOS: `~/Library/Application Support/scribe/logs/scribe-12345.log`
//! - Linux: `~/.local/share/scribe/logs/scribe-12345.log`
//!
//! Override with `--log-file <path>` or `SCRIBE_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const SCRIBE_CRATES: &[&str] = &["scribe", "scribe_bin", "scribe_log"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Respects the environment variable priority described in the module docs:
/// `SCRIBE_LOG` > `RUST_LOG` > default settings.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program --
/// dropping it flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let console_enabled =
        env::var("SCRIBE_LOG").is_ok() || env::var("RUST_LOG").is_ok() || cfg!(debug_assertions);

    let console_layer = if console_enabled {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(create_filter()),
        )
    } else {
        None
    };

    Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Console-only (no file output) and captured by the test harness. Will not
/// crash if called multiple times or if logging is already initialized by
/// another test.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

/// Split an optional override into a directory and a file name.
///
/// A path with an extension names the log file itself; anything else is
/// treated as the directory to put `scribe-<pid>.log` in.
fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("scribe-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scribe")
        .join("logs");

    (dir, filename)
}

/// File filter: uses user-specified level if set, otherwise defaults to `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("SCRIBE_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

/// Create the appropriate [`EnvFilter`] based on environment variables.
fn create_filter() -> EnvFilter {
    if let Ok(scribe_log) = env::var("SCRIBE_LOG") {
        return EnvFilter::new(expand_scribe_log(&scribe_log));
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }

    EnvFilter::new(expand_scribe_log("info"))
}

/// Expand `SCRIBE_LOG` values into full tracing filter directives.
///
/// - `SCRIBE_LOG=debug` becomes `warn,scribe=debug,scribe_bin=debug,...`
/// - `SCRIBE_LOG=scribe=trace,scribe_bin=debug` is used as-is
fn expand_scribe_log(scribe_log: &str) -> String {
    if scribe_log.contains('=') || scribe_log.contains(':') || scribe_log.contains(',') {
        return scribe_log.to_string();
    }

    let mut directives = String::from("warn");
    for name in SCRIBE_CRATES {
        directives.push_str(&format!(",{name}={scribe_log}"));
    }
    directives
}
