//! Command handlers for the `blackjack` CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via [`CliError`](crate::error::CliError)

pub mod cfg;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use play::{handle_play_command, PlayOptions};
pub use sim::{handle_sim_command, SimOptions};
pub use stats::handle_stats_command;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Resolved config, with a failure echoed to `err` before it is returned.
fn load_config(err: &mut dyn Write) -> Result<Config, CliError> {
    match config::load_with_sources() {
        Ok(resolved) => Ok(resolved.config),
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            Err(CliError::Config(e.to_string()))
        }
    }
}
