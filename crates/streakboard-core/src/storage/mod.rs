mod config;
mod session;

pub use config::{ApiConfig, Config, LeaderboardConfig, TrackerConfig};
pub use session::Session;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml` and `session.json`.
///
/// `STREAKBOARD_CONFIG_DIR` wins when set. Otherwise this is
/// `~/.config/streakboard[-dev]/`, with the `-dev` suffix when
/// `STREAKBOARD_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STREAKBOARD_CONFIG_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STREAKBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("streakboard-dev")
            } else {
                base_dir.join("streakboard")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
