//! The `{code, message, data}` wrapper every backend endpoint returns, and the
//! normalizer that unwraps it.
//!
//! # Design
//! Endpoint calls resolve with the unwrapped `data`, never the envelope. A
//! non-success code becomes `ApiError::Application` and is reported through
//! the `Notifier` once, here, so callers only decide what to do with the
//! error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::notify::Notifier;

/// Success sentinel used by the admin API.
pub const SUCCESS_CODE: i64 = 200;

/// Shown when the server gives no message of its own.
pub const FALLBACK_MESSAGE: &str = "请求失败";

/// Uniform response wrapper. The backend spells the message field `msg`;
/// both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: i64,
    #[serde(default, alias = "msg")]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Turns raw responses into typed results.
#[derive(Clone)]
pub struct ResponseNormalizer {
    success_code: i64,
    notifier: Arc<dyn Notifier>,
}

impl ResponseNormalizer {
    pub fn new(success_code: i64, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            success_code,
            notifier,
        }
    }

    pub fn success_code(&self) -> i64 {
        self.success_code
    }

    /// Unwrap the envelope carried by `response` into `T`.
    ///
    /// `data: null` (or absent) deserializes as JSON `null`, so `T` must be an
    /// `Option` or unit for endpoints that return nothing.
    ///
    /// A non-2xx status carrying a failure envelope keeps the envelope's
    /// code and message; one that claims success is reported as `Http`.
    pub fn normalize<T: DeserializeOwned>(&self, response: &HttpResponse) -> Result<T, ApiError> {
        let envelope: Envelope = match serde_json::from_str(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => {
                return Err(self.reject(ApiError::Http {
                    status: response.status,
                    body: response.body.clone(),
                }))
            }
            Err(e) => return Err(ApiError::Deserialization(e.to_string())),
        };

        // an error status never resolves, whatever code the body claims
        if !response.is_success() && envelope.code == self.success_code {
            return Err(self.reject(ApiError::Http {
                status: response.status,
                body: response.body.clone(),
            }));
        }

        if envelope.code != self.success_code {
            return Err(self.reject(ApiError::Application {
                code: envelope.code,
                message: envelope.message,
            }));
        }

        serde_json::from_value(envelope.data.unwrap_or(Value::Null))
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Notify about a failed call and hand the error back for propagation.
    pub fn reject(&self, err: ApiError) -> ApiError {
        let message = match &err {
            ApiError::Application { message, .. } | ApiError::Transport(message) if !message.is_empty() => {
                message.as_str()
            }
            _ => FALLBACK_MESSAGE,
        };
        self.notifier.error(message);
        err
    }
}
