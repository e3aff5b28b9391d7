//! Board Configuration
//!
//! Defaults, optionally overridden at build time (`KANBAN_API_BASE_URL`)
//! and at runtime by a JSON block in the page:
//!
//! ```html
//! <script id="kanban-config" type="application/json">
//!   { "api_base_url": "https://tasks.example.com/", "rollback_on_failure": false }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::gesture::DOUBLE_TAP_WINDOW_MS;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 15_000;
const CONFIG_ELEMENT_ID: &str = "kanban-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Base URL of the task service, e.g. `http://localhost:5000/`
    pub api_base_url: String,
    /// Abort requests after this many ms; 0 disables the timeout
    pub request_timeout_ms: u32,
    pub double_tap_window_ms: f64,
    /// Undo optimistic changes whose remote call failed
    pub rollback_on_failure: bool,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("KANBAN_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            rollback_on_failure: true,
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the page's config block. A missing block yields the defaults;
    /// a malformed one is an error so the caller can report it once logging
    /// is up.
    pub fn load() -> Result<Self, serde_json::Error> {
        let Some(text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
        else {
            return Ok(Self::default());
        };
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.double_tap_window_ms, 300.0);
        assert!(config.rollback_on_failure);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_override() {
        let config = BoardConfig::from_json(r#"{"api_base_url":"https://tasks.example.com","rollback_on_failure":false}"#).unwrap();
        assert_eq!(config.api_base_url, "https://tasks.example.com");
        assert!(!config.rollback_on_failure);
        assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(BoardConfig::from_json("{ api_base_url: nope").is_err());
        assert!(BoardConfig::from_json(r#"{"request_timeout_ms":"soon"}"#).is_err());
    }
}
