//! `dfplayer`: send one operation (or the demo sequence) to a DFPlayer Pro.
//!
//! Usage: dfplayer [--config FILE] [--device PATH] [--baud N] <action>
//!
//! Set `RUST_LOG=debug` (or pass `-v`) to see every frame on the wire.

use std::process::ExitCode;

use clap::Parser;
use dfplayer_cli::args::Cli;
use dfplayer_cli::run_commands;
use dfplayer_driver::DeviceController;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Validate before touching the port, so a bad argument never opens it.
    let commands = match cli.action.to_commands() {
        Ok(commands) => commands,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let config = match cli.controller_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let mut controller = match DeviceController::open(&config) {
        Ok(controller) => controller,
        Err(e) => {
            error!(device = %config.uart.device, "failed to open serial port: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    match run_commands(&mut controller, &commands, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
