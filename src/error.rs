use thiserror::Error;

/// Failures of the calculator form submission. The `Display` text is what the
/// user sees in the alert.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Please fill in all required fields")]
    Validation,

    #[error("Network error. Please try again.")]
    Network(String),

    #[error("Error: {0}")]
    Application(String),

    #[error("Network error. Please try again.")]
    Storage(#[from] TransferError),
}

impl SubmitError {
    /// Diagnostic detail for the console, separate from the alert text.
    pub fn detail(&self) -> String {
        match self {
            SubmitError::Validation => "required field empty".to_string(),
            SubmitError::Network(detail) => detail.clone(),
            SubmitError::Application(message) => message.clone(),
            SubmitError::Storage(err) => err.to_string(),
        }
    }
}

impl From<SubmitError> for String {
    fn from(err: SubmitError) -> Self {
        err.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransferError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Session storage write failed: {0}")]
    Write(String),

    #[error("Could not serialize prediction: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Canvas has no 2d context")]
    ContextUnavailable,

    #[error("Chart config error: {0}")]
    Config(String),

    #[error("Charting library error: {0}")]
    Library(String),
}

/// Readable text for a JavaScript exception value.
pub fn js_error_text(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}
