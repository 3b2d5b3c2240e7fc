use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct ArtMachineConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    /// Root of the static site served for every path outside the API.
    pub static_dir: Option<String>,
    /// OpenTelemetry collector; spans are only exported when this is set.
    pub otlp_endpoint: Option<String>,
}

impl ArtMachineConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common = core_config::Config::load()?;

        Ok(ArtMachineConfig {
            common,
            static_dir: optional_env("STATIC_DIR"),
            otlp_endpoint: optional_env("OTLP_ENDPOINT"),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
