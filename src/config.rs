use crate::input::RetryPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "DRILLS_CONFIG";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Name used for the value in the `read-int` prompt and diagnostic
    pub variable_name: String,
    /// What `read-int` does after a line that is not a number
    pub retry_policy: RetryPolicy,
    /// Base URL of the song search service
    pub songs_base_url: String,
    /// Request timeout for the song search, in seconds
    pub songs_timeout_secs: u64,
    /// Default inclusive bounds for `roll`
    pub roll_low: i64,
    pub roll_high: i64,
    /// Directory the `analyze` charts are written to
    pub chart_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            variable_name: "x".to_owned(),
            retry_policy: RetryPolicy::Reprompt,
            songs_base_url: crate::songs::DEFAULT_BASE_URL.to_owned(),
            songs_timeout_secs: 10,
            roll_low: 1,
            roll_high: 12,
            chart_dir: PathBuf::from("."),
        }
    }
}

/// `$DRILLS_CONFIG` if set, otherwise `<config dir>/drills/config.json`.
pub fn get_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("drills")
        .join("config.json")
}

/// Loads settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_app_config() -> AppSettings {
    let path = get_config_path();
    if path.exists() {
        match std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_json::from_str::<AppSettings>(&content)?))
        {
            Ok(settings) => return settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            }
        }
    }
    AppSettings::default()
}

pub fn save_app_config(settings: &AppSettings) -> Result<()> {
    let path = get_config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}
