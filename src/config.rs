use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::constants::{
    DEFAULT_DETAILS_SELECTOR, DEFAULT_LOCALE, DEFAULT_STATUS_SELECTOR, DEFAULT_TABLE_SELECTOR,
};
use crate::errors::ConfigError;

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_status_selector() -> String {
    DEFAULT_STATUS_SELECTOR.to_string()
}

fn default_table_selector() -> String {
    DEFAULT_TABLE_SELECTOR.to_string()
}

fn default_details_selector() -> String {
    DEFAULT_DETAILS_SELECTOR.to_string()
}

/// Page configuration handed to `initJobsApp` / `initEventsApp` from the
/// hosting HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub data_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_status_selector")]
    pub status_selector: String,
    #[serde(default = "default_table_selector")]
    pub table_selector: String,
    #[serde(default = "default_details_selector")]
    pub details_selector: String,
}

impl AppConfig {
    /// Config pointing at `data_url` with every other field defaulted.
    pub fn from_url(data_url: &str) -> Self {
        Self {
            data_url: data_url.to_string(),
            locale: default_locale(),
            status_selector: default_status_selector(),
            table_selector: default_table_selector(),
            details_selector: default_details_selector(),
        }
    }

    /// Read and validate the JS config object.
    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| ConfigError::Decode(e.to_string()))?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.data_url.trim().is_empty() {
            return Err(ConfigError::Invalid("dataUrl must not be empty".into()));
        }
        for (name, selector) in [
            ("statusSelector", &self.status_selector),
            ("tableSelector", &self.table_selector),
            ("detailsSelector", &self.details_selector),
        ] {
            if selector.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }
        Ok(self)
    }
}
