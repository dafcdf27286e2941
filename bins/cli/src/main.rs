//! Billsplit CLI
//!
//! Interactive bill splitter: collects a total, participants, and a split
//! method, prints the allocation, and optionally exports it.

mod export;
mod shell;

use std::io;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billsplit_shared::{AppConfig, AppError};

use crate::shell::Shell;

/// Exit code for failures that carry no [`AppError`].
const GENERIC_FAILURE: u8 = 1;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code_for(&err);
            error!(error = %err, code, "Billsplit failed");
            ExitCode::from(code)
        }
    }
}

/// Maps a fatal error to the process exit code of its [`AppError`].
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AppError>()
        .map_or(GENERIC_FAILURE, AppError::exit_code)
}

fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so prompts on stdout stay readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billsplit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::load().map_err(AppError::from)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);
    let summary = shell.run()?;

    info!(
        completed = summary.completed,
        rejected = summary.rejected,
        exported = summary.exported.len(),
        "Session finished"
    );

    Ok(())
}
