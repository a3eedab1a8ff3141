//! Locates and parses the TOML configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::file::ConfigFile;
use crate::core::error::{AppError, Result};

const CONFIG_FILE_NAME: &str = "email-triage.toml";

/// Loads a configuration file, either from an explicit path or from the
/// default search locations. Returns the parsed file together with the path
/// it was read from, or `None` when no explicit path was given and no default
/// location exists.
pub(crate) fn load_config_file(explicit: Option<&Path>) -> Result<Option<(ConfigFile, String)>> {
    if let Some(path) = explicit {
        let parsed = read_and_parse(path)?;
        return Ok(Some((parsed, path.display().to_string())));
    }

    for candidate in default_candidates() {
        if candidate.is_file() {
            tracing::debug!("Found configuration file at {}", candidate.display());
            let parsed = read_and_parse(&candidate)?;
            return Ok(Some((parsed, candidate.display().to_string())));
        }
    }

    tracing::debug!("No configuration file found, using built-in defaults");
    Ok(None)
}

fn read_and_parse(path: &Path) -> Result<ConfigFile> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!(
            "Failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;
    toml::from_str(&raw).map_err(|e| {
        AppError::Config(format!(
            "Failed to parse configuration file '{}': {}",
            path.display(),
            e
        ))
    })
}

fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(
            PathBuf::from(home)
                .join(".config")
                .join("email-triage")
                .join("config.toml"),
        );
    }
    candidates
}
