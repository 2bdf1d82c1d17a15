//! One-shot hand-off of a prediction from the calculator page to the results
//! page, through session storage.

use serde_json::Value;
use tracing::warn;

use crate::error::{js_error_text, TransferError};
use crate::model::PredictionResult;

/// Key/value storage scoped to the browsing session.
pub trait SessionBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, TransferError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), TransferError>;
}

pub struct BrowserSession;

impl BrowserSession {
    fn storage() -> Result<web_sys::Storage, TransferError> {
        web_sys::window()
            .ok_or_else(|| TransferError::Unavailable("no window".to_string()))?
            .session_storage()
            .map_err(|e| TransferError::Unavailable(js_error_text(&e)))?
            .ok_or_else(|| TransferError::Unavailable("sessionStorage disabled".to_string()))
    }
}

impl SessionBackend for BrowserSession {
    fn get_item(&self, key: &str) -> Result<Option<String>, TransferError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| TransferError::Unavailable(js_error_text(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), TransferError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| TransferError::Write(js_error_text(&e)))
    }
}

pub struct TransferStore<B> {
    backend: B,
    key: String,
}

impl<B: SessionBackend> TransferStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Store the response body exactly as received.
    pub fn write(&self, body: &Value) -> Result<(), TransferError> {
        let text =
            serde_json::to_string(body).map_err(|e| TransferError::Serialize(e.to_string()))?;
        self.backend.set_item(&self.key, &text)
    }

    /// The stored body, if any. Reading does not consume it.
    pub fn read_raw(&self) -> Option<Value> {
        let text = match self.backend.get_item(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cannot read transferred prediction: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Transferred prediction is not JSON: {}", e);
                None
            }
        }
    }

    /// The stored prediction, or `None` when missing or not shaped like one.
    pub fn read(&self) -> Option<PredictionResult> {
        let value = self.read_raw()?;
        let result: PredictionResult = match serde_json::from_value(value) {
            Ok(result) => result,
            Err(e) => {
                warn!("Transferred prediction has unexpected shape: {}", e);
                return None;
            }
        };
        if let Err(problem) = result.check() {
            warn!("Transferred prediction rejected: {}", problem);
            return None;
        }
        Some(result)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    /// Session storage kept in memory; clones share the same map.
    #[derive(Clone, Default)]
    pub struct MemorySession {
        pub items: Rc<RefCell<HashMap<String, String>>>,
        pub fail_writes: bool,
    }

    impl SessionBackend for MemorySession {
        fn get_item(&self, key: &str) -> Result<Option<String>, TransferError> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), TransferError> {
            if self.fail_writes {
                return Err(TransferError::Write("QuotaExceededError".to_string()));
            }
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
