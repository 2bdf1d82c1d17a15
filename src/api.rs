use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::AppConfig;
use crate::error::{js_error_text, SubmitError};
use crate::model::{
    truthy, FormInput, MaterialsResponse, ModelInfo, ModelInfoResponse, FALLBACK_MATERIALS,
};

pub const CSRF_HEADER: &str = "X-CSRFToken";

/// The prediction service as seen by the submission controller.
#[allow(async_fn_in_trait)]
pub trait PredictApi {
    /// POST the input; `Ok` carries the full body of a successful prediction.
    async fn predict(&self, input: &FormInput, csrf_token: &str) -> Result<Value, SubmitError>;
}

/// Classify a prediction response. A body with a falsy `success` is an
/// application error whatever the status; otherwise the status must be 2xx
/// and the body must be JSON.
pub fn interpret_response(status: u16, body: &str) -> Result<Value, SubmitError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        SubmitError::Network(format!("HTTP {} with unreadable body: {}", status, e))
    })?;

    let success = value.get("success").map(truthy).unwrap_or(false);
    if !success {
        let message = value
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        return Err(SubmitError::Application(message));
    }
    if !(200..300).contains(&status) {
        return Err(SubmitError::Network(format!("HTTP {}", status)));
    }
    Ok(value)
}

/// Absolute URL for a server path. The fetch backend needs absolute URLs.
pub fn resolve(origin: &str, path: &str) -> Result<Url, String> {
    Url::parse(origin)
        .and_then(|base| base.join(path))
        .map_err(|e| format!("Cannot resolve '{}' against '{}': {}", path, origin, e))
}

fn page_origin() -> Result<String, String> {
    web_sys::window()
        .ok_or_else(|| "no window".to_string())?
        .location()
        .origin()
        .map_err(|e| js_error_text(&e))
}

pub struct HttpPredictApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpPredictApi {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn for_page(config: &AppConfig) -> Result<Self, String> {
        let origin = page_origin()?;
        Ok(Self::new(resolve(&origin, &config.predict_endpoint)?))
    }
}

impl PredictApi for HttpPredictApi {
    async fn predict(&self, input: &FormInput, csrf_token: &str) -> Result<Value, SubmitError> {
        info!("Requesting prediction for {} ({})", input.material, input.transport_mode);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, csrf_token)
            .json(input)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        debug!("Prediction response: HTTP {}", status);
        interpret_response(status, &body)
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let url = resolve(&page_origin()?, path)?;
    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status().as_u16()));
    }
    response.json::<T>().await.map_err(|e| e.to_string())
}

/// Materials the service accepts, or the built-in list when it cannot say.
pub async fn fetch_materials(config: &AppConfig) -> Vec<String> {
    match get_json::<MaterialsResponse>(&config.materials_endpoint).await {
        Ok(resp) if resp.success && !resp.materials.is_empty() => resp.materials,
        Ok(_) => {
            debug!("Material catalog empty; using built-in list");
            fallback_materials()
        }
        Err(e) => {
            debug!("Material catalog unavailable ({}); using built-in list", e);
            fallback_materials()
        }
    }
}

pub fn fallback_materials() -> Vec<String> {
    FALLBACK_MATERIALS.iter().map(|m| m.to_string()).collect()
}

pub async fn fetch_model_info(config: &AppConfig) -> Result<Option<ModelInfo>, String> {
    let resp = get_json::<ModelInfoResponse>(&config.model_info_endpoint).await?;
    if !resp.success {
        return Err("model info request was not successful".to_string());
    }
    Ok(resp.model_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_passes_through() {
        let body = r#"{"success": true, "co2_kg": 4.2}"#;
        let value = interpret_response(200, body).unwrap();
        assert_eq!(value["co2_kg"], 4.2);
    }

    #[test]
    fn test_server_error_message_surfaces_on_any_status() {
        let body = r#"{"success": false, "error": "Invalid material"}"#;
        assert_eq!(
            interpret_response(400, body),
            Err(SubmitError::Application("Invalid material".into()))
        );
        assert_eq!(
            interpret_response(200, body),
            Err(SubmitError::Application("Invalid material".into()))
        );
    }

    #[test]
    fn test_missing_success_flag_is_application_error() {
        assert_eq!(
            interpret_response(200, r#"{"co2_kg": 1.0}"#),
            Err(SubmitError::Application("Unknown error".into()))
        );
    }

    #[test]
    fn test_unreadable_body_is_network_error() {
        let err = interpret_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
        assert_eq!(err.to_string(), "Network error. Please try again.");
    }

    #[test]
    fn test_non_2xx_with_success_is_failure() {
        let err = interpret_response(500, r#"{"success": true}"#).unwrap_err();
        assert_eq!(err, SubmitError::Network("HTTP 500".into()));
    }

    #[test]
    fn test_truthiness() {
        assert!(truthy(&serde_json::json!(true)));
        assert!(truthy(&serde_json::json!(1)));
        assert!(truthy(&serde_json::json!("yes")));
        assert!(!truthy(&serde_json::json!(0)));
        assert!(!truthy(&serde_json::json!("")));
        assert!(!truthy(&Value::Null));
    }

    #[test]
    fn test_resolve_endpoint() {
        let url = resolve("https://calc.example.org", "/api/predict/").unwrap();
        assert_eq!(url.as_str(), "https://calc.example.org/api/predict/");
        assert!(resolve("not a url", "/api/predict/").is_err());
    }

    #[test]
    fn test_fallback_materials() {
        let materials = fallback_materials();
        assert_eq!(materials.len(), 35);
        assert_eq!(materials[0], "Cotton");
        assert!(materials.iter().any(|m| m == "Fish_Wild"));
    }
}
