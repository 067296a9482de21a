//! Handles settings for the application. Configuration is read from
//! `settings.toml` (optional), then `OFFLINEPAY__*` environment variables,
//! then command line overrides.
use std::time::Duration;

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use engine::{Currency, Money};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_SETTINGS_PATH: &str = "settings";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Simulated latencies, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub processing_ms: u64,
    pub scan_ms: u64,
    pub split_request_ms: u64,
    pub conversion_ms: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            processing_ms: 2000,
            scan_ms: 3000,
            split_request_ms: 1500,
            conversion_ms: 1500,
        }
    }
}

impl Delays {
    pub fn processing(&self) -> Duration {
        Duration::from_millis(self.processing_ms)
    }

    pub fn scan(&self) -> Duration {
        Duration::from_millis(self.scan_ms)
    }

    pub fn split_request(&self) -> Duration {
        Duration::from_millis(self.split_request_ms)
    }

    pub fn conversion(&self) -> Duration {
        Duration::from_millis(self.conversion_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub currency: String,
    pub network_fee: String,
}

impl Default for Payment {
    fn default() -> Self {
        Self {
            currency: Currency::Usd.code().to_string(),
            network_fee: "0.25".to_string(),
        }
    }
}

impl Payment {
    pub fn default_currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }

    /// Network fee expressed in `currency`.
    pub fn fee(&self, currency: Currency) -> Result<Money> {
        Ok(Money::parse_major(&self.network_fee, currency)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub available: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self { available: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub delays: Delays,
    pub payment: Payment,
    pub camera: Camera,
}

impl Settings {
    pub fn new(path: Option<&str>) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_SETTINGS_PATH)).required(false))
            .add_source(Environment::with_prefix("OFFLINEPAY").separator("__"));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}
