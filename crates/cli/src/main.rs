//! Second Opinion CLI — the main entry point.
//!
//! Sends a message (plus optional context files) to a web-search-enabled
//! model and prints the answer with the sources it used.
//!
//! Exit codes: `0` once a response is rendered, `1` on any argument,
//! configuration, HTTP, timeout or transport failure.

use clap::Parser;
use std::process::ExitCode;

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(
    name = "second-opinion",
    about = "Second Opinion — ask a peer AI consultant with live web search",
    version
)]
struct Cli {
    /// The question or request to send
    #[arg(long, allow_hyphen_values = true)]
    message: String,

    /// Comma-separated context files to append to the prompt
    #[arg(long, value_delimiter = ',')]
    files: Vec<String>,

    /// Override the model ($SECOND_OPINION_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Override the timeout in milliseconds ($SECOND_OPINION_TIMEOUT)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize tracing (stderr keeps stdout for the response)
    let filter = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = commands::consult::ConsultOptions {
        message: cli.message,
        files: cli.files,
        model: cli.model,
        timeout_ms: cli.timeout,
    };

    match commands::consult::run(options, std::env::current_dir()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            render::error(&mut std::io::stderr().lock(), &e);
            ExitCode::FAILURE
        }
    }
}
