use std::process::ExitCode;

use clap::Parser;
use console::style;

use productpath::cli::{execute, Cli};
use productpath::config::load_config;
use productpath::observability::{default_filter, init_logging_with};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging_with(default_filter(cli.verbose));

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        execute(&cli.command, &config, &mut out)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
