//! Logged-in session persisted next to the config as `session.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::User;
use crate::error::CoreError;

const FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    /// Last known copy of the logged-in user.
    pub user: User,
}

impl Session {
    fn path_in(dir: &Path) -> PathBuf {
        dir.join(FILE_NAME)
    }

    /// Returns `None` when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Option<Self>, CoreError> {
        match std::fs::read_to_string(Self::path_in(dir)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, dir: &Path) -> Result<(), CoreError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path_in(dir), content)?;
        Ok(())
    }

    /// Forget the session. Succeeds if there was none.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub fn clear_in(dir: &Path) -> Result<(), CoreError> {
        match std::fs::remove_file(Self::path_in(dir)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
