//! Runtime configuration read from the host page.
//!
//! The page may embed `<script type="application/json" id="carbonlens-config">`
//! with any subset of the fields below; everything else keeps its default.

use serde::Deserialize;
use tracing::warn;

pub const CONFIG_ELEMENT_ID: &str = "carbonlens-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub predict_endpoint: String,
    pub materials_endpoint: String,
    pub model_info_endpoint: String,
    pub results_path: String,
    pub csrf_cookie: String,
    pub transfer_key: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predict_endpoint: "/api/predict/".to_string(),
            materials_endpoint: "/api/materials/".to_string(),
            model_info_endpoint: "/api/model-info/".to_string(),
            results_path: "/results/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            transfer_key: "carbonResults".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid config block: {}", e))
    }

    /// Read the config block from the current document, falling back to defaults.
    /// Logging is not initialized yet when this runs, so problems are reported
    /// after the fact by [`AppConfig::report`].
    pub fn from_document() -> (Self, Option<String>) {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            _ => (Self::default(), None),
        }
    }

    pub fn report(problem: Option<String>) {
        if let Some(problem) = problem {
            warn!("{}; using defaults", problem);
        }
    }
}
