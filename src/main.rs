//! tiered-config: resolve and inspect layered JSON application configuration
//!
//! Loads the defaults and environment documents from the first available
//! tier, merges them and prints the result. Configuration errors terminate
//! with the code registered for them in `exit_codes`.

use std::process::ExitCode;
use tiered_config::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use tiered_config::ConfigError;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<ConfigError>().map_or(EXIT_ERROR, ConfigError::exit_code);
            ExitCode::from(code)
        }
    }
}
