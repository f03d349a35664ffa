//! User settings for Tally
//!
//! Settings live in `config.json` next to the data directory. A missing file
//! means defaults; a file that exists but cannot be parsed is an error.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::MatchMode;
use crate::storage::file_io::write_json_atomic;

/// User settings for Tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How entered descriptions are compared for uniqueness and deletion
    #[serde(default)]
    pub description_match: MatchMode,

    /// Password attempts allowed at login before the program terminates
    #[serde(default = "default_password_attempts")]
    pub password_attempts: u32,

    /// Currency symbol shown in the ledger table
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_password_attempts() -> u32 {
    3
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            description_match: MatchMode::default(),
            password_attempts: default_password_attempts(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.password_attempts == 0 {
            tracing::warn!("password_attempts of 0 in settings, using 1");
            settings.password_attempts = 1;
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
