mod config;

pub use config::{Config, DisplayConfig, MeetingConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the configuration directory.
///
/// `LIGHTNING_ROUND_HOME` overrides the location outright. Otherwise this is
/// `~/.config/lightning-round[-dev]/`, with the `-dev` suffix selected by
/// `LIGHTNING_ROUND_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("LIGHTNING_ROUND_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("LIGHTNING_ROUND_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("lightning-round-dev")
            } else {
                base_dir.join("lightning-round")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
