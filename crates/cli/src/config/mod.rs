use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/chip.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the key-value state file lives.
    pub state_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_path: "config/chip_state.json".to_string(),
        }
    }
}

/// Loads configuration: TOML file, then `CHIP_*` environment variables,
/// then explicit command-line overrides, later sources winning.
pub fn load(config_path: Option<&str>, state_path: Option<String>) -> Result<AppConfig> {
    let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CHIP"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(state_path) = state_path {
        settings.state_path = state_path;
    }

    Ok(settings)
}
