//! Dashboard Configuration
//!
//! Read once at startup from `window.MES_DASHBOARD_CONFIG`, which the host
//! page may define. Every field has a default.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Global JS object holding the config
pub const CONFIG_GLOBAL: &str = "MES_DASHBOARD_CONFIG";

/// Browser timers take the delay as a signed 32-bit value
pub const MAX_TRANSITION_TIMEOUT_MS: u32 = i32::MAX as u32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// MES origin; empty means the page's own origin
    pub base_url: String,
    pub transition_timeout_ms: u32,
    pub notification_auto_dismiss: bool,
    pub log_level: String,
    pub log_capacity: usize,
    pub orders_enabled: bool,
    pub operational_tasks_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            transition_timeout_ms: 30_000,
            notification_auto_dismiss: false,
            log_level: "info".to_string(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
            orders_enabled: true,
            operational_tasks_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Malformed(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Malformed(msg) => write!(f, "Malformed {}: {}", CONFIG_GLOBAL, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(json)
            .map(Self::clamp_timeout)
            .map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    fn clamp_timeout(mut self) -> Self {
        if self.transition_timeout_ms > MAX_TRANSITION_TIMEOUT_MS {
            log::warn!("transitionTimeoutMs {} clamped to {}", self.transition_timeout_ms, MAX_TRANSITION_TIMEOUT_MS);
            self.transition_timeout_ms = MAX_TRANSITION_TIMEOUT_MS;
        }
        self
    }

    pub fn transition_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.transition_timeout_ms))
    }

    /// Unknown level names fall back to `Info`
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Fill an empty base URL with `origin`
    pub fn with_origin(mut self, origin: &str) -> Self {
        if self.base_url.trim().is_empty() {
            self.base_url = origin.to_string();
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Read the config from the page. A malformed object yields defaults plus the error.
pub fn load_config() -> (DashboardConfig, Option<ConfigError>) {
    let Some(window) = web_sys::window() else {
        return (DashboardConfig::default(), None);
    };
    let origin = window.location().origin().unwrap_or_default();

    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).unwrap_or(JsValue::UNDEFINED);
    let (config, error) = if raw.is_undefined() || raw.is_null() {
        (DashboardConfig::default(), None)
    } else {
        match serde_wasm_bindgen::from_value::<DashboardConfig>(raw) {
            Ok(config) => (config.clamp_timeout(), None),
            Err(e) => (DashboardConfig::default(), Some(ConfigError::Malformed(e.to_string()))),
        }
    };
    (config.with_origin(&origin), error)
}
