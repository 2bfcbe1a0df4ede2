//! API keys issued to external integrators.

use serde::{Deserialize, Serialize};

use crate::client::Call;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalApiKey {
    pub id: i64,
    pub app_id: String,
    pub app_key: String,
    #[serde(default)]
    pub app_secret: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub description: String,
    /// 1 enabled, 0 disabled.
    pub status: i32,
    #[serde(default)]
    pub ip_whitelist: String,
    #[serde(default)]
    pub notify_url: String,
    #[serde(default)]
    pub rate_limit: i64,
    #[serde(default)]
    pub expire_time: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub status: i32,
}

pub fn create(input: &CreateKey) -> Result<Call<ExternalApiKey>, ApiError> {
    Call::post("/external-api-keys", input)
}

/// The caller's key, or `None` when none has been issued yet.
pub fn mine() -> Call<Option<ExternalApiKey>> {
    Call::get("/external-api-keys/my")
}

pub fn regenerate(id: i64) -> Call<ExternalApiKey> {
    Call::post_empty(format!("/external-api-keys/{id}/regenerate"))
}

pub fn update_status(id: i64, status: i32) -> Result<Call<ExternalApiKey>, ApiError> {
    Call::put(format!("/external-api-keys/{id}/status"), &UpdateStatus { status })
}
