use std::time::Duration;

use serde::Deserialize;

use crate::constants::{DEFAULT_BASE_URL, HTTP_TIMEOUT};

/// Where and how to reach the ESPN site API.
#[derive(Clone, Debug, Deserialize)]
pub struct EspnSettings {
    /// Root of the football endpoints, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default = "default_region")]
    pub region: String,
}

impl EspnSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EspnSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            lang: default_lang(),
            region: default_region(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    HTTP_TIMEOUT.as_millis() as u64
}

fn default_lang() -> String {
    "es".to_string()
}

fn default_region() -> String {
    "us".to_string()
}
