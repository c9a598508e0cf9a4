//! # jf
//!
//! Command-line front end of the JFrog Platform.
//!
//! ## Quick Start
//!
//! ```bash
//! # List the available commands
//! jf --help
//!
//! # Upload files to Artifactory
//! jf rt upload "build/*.zip" generic-local/releases/
//!
//! # Misspelled commands get a suggestion
//! jf rt uplaod
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `cli-settings.yaml` in the CLI home directory
//! (`$JFROG_CLI_HOME_DIR`, or `~/.jfrog`). Installed plugins live under `<home>/plugins`.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use jf_cli::{
    commands::{self, CommandContext},
    config::{home_dir, load_settings},
    dispatch::Dispatcher,
    logging::init_logging,
    service::RequestPrinter,
    validate::validate_registry,
};
use tracing::error;

/// Main entry point for the jf CLI
///
/// Builds and validates the command registry, then dispatches the command line. Any
/// failure before dispatch is fatal; action errors are logged and exit with status 1.
fn main() -> ExitCode {
    let home = home_dir();
    let settings = match load_settings(&home) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(None);
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(settings.log_level().as_deref());

    let ctx = CommandContext {
        client: Arc::new(RequestPrinter::new(io::stdout())),
        plugins_dir: settings.plugins_dir(&home),
    };
    let registry = match commands::registry(&ctx) {
        Ok(registry) => registry,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = validate_registry(&registry) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let dispatcher = Dispatcher::new(registry, env!("CARGO_PKG_VERSION"));
    match dispatcher.run(std::env::args_os(), &mut io::stdout()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code().clamp(0, 255) as u8),
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
