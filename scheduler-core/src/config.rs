//! Runtime configuration (ambient stack, grounded on the teacher's
//! `infrastructure::config::Settings`): everything outside the per-call
//! `constraints` payload that the demo binary and the Holiday Oracle
//! default need to start up — the public holiday API location and a
//! fallback solver timeout.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct HolidaySettings {
    pub base_url: String,
    pub country_code: String,
}

impl Default for HolidaySettings {
    fn default() -> Self {
        Self {
            base_url: "https://date.nager.at/api/v3/publicholidays".to_string(),
            country_code: "JP".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverDefaults {
    pub timeout_seconds: u32,
    pub num_workers: u32,
}

impl Default for SolverDefaults {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            num_workers: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub holiday: HolidaySettings,
    #[serde(default)]
    pub solver: SolverDefaults,
}

impl Settings {
    /// Loads `config/default.{toml,yaml,...}` plus `config/{RUN_ENV}`
    /// overrides plus `APP__`-prefixed environment variables, tolerating a
    /// missing config directory entirely (spec has no file-based config of
    /// its own; this only exists to parameterize the demo binary and the
    /// holiday oracle's defaults without recompiling).
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        match config.try_deserialize() {
            Ok(settings) => Ok(settings),
            Err(_) => Ok(Settings::default()),
        }
    }
}
