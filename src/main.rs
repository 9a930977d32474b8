//! Pandora Helper API server.
//!
//! Loads configuration, installs logging, assembles the HTTP service,
//! validates the admin credential and serves until SIGINT/SIGTERM.
//! Exits 0 after a graceful stop, 1 on any startup or runtime failure.

use std::process::ExitCode;

use clap::Parser;

use pandora_helper::cli::Cli;
use pandora_helper::lifecycle::{self, signals, Shutdown};
use pandora_helper::ServiceAssembler;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let shutdown = Shutdown::new();
    let signal_task = signals::spawn_signal_handler(shutdown.clone());

    let result = lifecycle::run(cli.config_root(), ServiceAssembler::new(), shutdown.clone()).await;

    // Lets the signal task finish.
    shutdown.trigger();
    signals::join_signal_handler(signal_task).await;

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if !err.reported_via_log() {
                eprintln!("pandora-helper: {}: {}", err.headline(), err);
            }
            ExitCode::FAILURE
        }
    }
}
