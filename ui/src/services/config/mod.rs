//! Application configuration
//!
//! Defaults cover a local backend. A deployment can override any part by
//! storing a JSON document under the `app_config` key in localStorage.

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use crate::features::segmented::DateFieldOrder;
use crate::{console_info, console_warn};

/// localStorage key holding an optional JSON override
pub const CONFIG_STORAGE_KEY: &str = "app_config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub wizard: WizardConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Quiet period before a username availability request is sent
    pub username_debounce_ms: u64,
    pub minimum_age_years: u32,
    pub otp_length: usize,
    pub date_field_order: DateFieldOrder,
    /// Leading profile steps that cannot be skipped
    pub profile_mandatory_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// localStorage when true, sessionStorage otherwise
    pub persistent_tokens: bool,
    pub key_prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_agent: "onboarding-client/1.0".to_string(),
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            username_debounce_ms: 500,
            minimum_age_years: 13,
            otp_length: 6,
            date_field_order: DateFieldOrder::MonthDayYear,
            profile_mandatory_steps: 0,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persistent_tokens: false,
            key_prefix: "onboarding.".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults merged with the localStorage override, if one is stored and valid
    pub fn load() -> Self {
        let Ok(json) = LocalStorage::get::<String>(CONFIG_STORAGE_KEY) else {
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    console_info!("[Config] Loaded override from {}", CONFIG_STORAGE_KEY);
                    config
                }
                Err(errors) => {
                    console_warn!("[Config] Ignoring invalid override: {}", errors.join("; "));
                    Self::default()
                }
            },
            Err(e) => {
                console_warn!("[Config] Failed to parse override: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            errors.push("API base_url must be an absolute http(s) URL".to_string());
        }

        if self.wizard.otp_length == 0 {
            errors.push("Wizard otp_length must be greater than 0".to_string());
        }

        if self.wizard.minimum_age_years > 150 {
            errors.push("Wizard minimum_age_years must be at most 150".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
