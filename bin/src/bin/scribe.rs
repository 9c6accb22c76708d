use clap::Parser;
use scribe::Layout;
use scribe_bin::{
    cli::{Cli, Command},
    commands,
};
use scribe_log::LogConfig;
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = scribe_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    })
    .unwrap_or_else(|e| {
        eprintln!("Error: Failed to initialize logging: {e}");
        std::process::exit(1);
    });

    let config = cli.resolve_config().unwrap_or_else(|e| {
        eprintln!("Error: {}", snafu::Report::from_error(e));
        std::process::exit(1);
    });

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut layout = Layout::from_config(&config);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            commands::shell::run(&mut layout, stdin, &mut stdout).await
        },
        Command::Files { query } => {
            commands::files::handle(&config, query.as_deref(), &mut std::io::stdout().lock())
        },
    };

    if let Err(e) = result {
        eprintln!("Command failed: {e}");
        std::process::exit(1);
    }
}
