//! App Configuration
//!
//! Optional JSON in the `data-config` attribute of `<body>`, e.g.
//! `{"log_level":"debug","sensors":{"touch":{"distance":{"px":8.0}}}}`.

use leptos_dragdrop::SensorConfig;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

/// Attribute on `<body>` holding the configuration
pub const CONFIG_ATTR: &str = "data-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid data-config attribute: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LevelFilter,
    /// Overrides the page's own activation constraints when set
    pub sensors: Option<SensorConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            sensors: None,
        }
    }
}

impl AppConfig {
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the configuration from the document; no attribute means defaults
    pub fn from_document() -> Result<Self, ConfigError> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|body| body.get_attribute(CONFIG_ATTR));
        match raw {
            Some(json) if !json.trim().is_empty() => Self::parse(&json),
            _ => Ok(Self::default()),
        }
    }

    /// Sensor settings for a page whose own preset is `preset`
    pub fn sensors_or(&self, preset: SensorConfig) -> SensorConfig {
        self.sensors.unwrap_or(preset)
    }
}
