use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::warn;

/// Environment variable naming an explicit roster file or directory
pub const ROSTER_ENV_VAR: &str = "MCM_ROSTER";

const APP_DIR_NAME: &str = "medieval-character-manager";
const DEFAULT_ROSTER_FILE: &str = "roster.json";

/// Get the roster path: `$MCM_ROSTER`, else `<data dir>/medieval-character-manager/roster.json`
pub fn get_default_roster_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(ROSTER_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_dir().context("Failed to determine platform data directory")?;
    Ok(data_dir.join(APP_DIR_NAME).join(DEFAULT_ROSTER_FILE))
}

/// Read and parse an environment override, ignoring (with a warning) values that do not parse
pub fn env_override<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            None
        }
    }
}
