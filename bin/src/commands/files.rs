use scribe::{render, Config, FilePanel};
use std::io::{self, Write};

/// Print the configured file list, filtered by `query` when given.
pub fn handle(config: &Config, query: Option<&str>, out: &mut impl Write) -> io::Result<()> {
    let mut panel = match &config.files {
        Some(entries) => FilePanel::new(entries.clone()),
        None => FilePanel::default(),
    };
    if let Some(query) = query {
        panel.set_query(query);
    }

    for line in render::files(&panel, None) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
