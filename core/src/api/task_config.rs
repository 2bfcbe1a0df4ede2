//! Automatic recharge task configuration per platform account and channel.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Ack, Page};
use crate::client::Call;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub id: i64,
    pub platform_id: i64,
    #[serde(default)]
    pub platform_name: String,
    pub platform_account_id: i64,
    #[serde(default)]
    pub platform_account: String,
    pub channel_id: i64,
    #[serde(default)]
    pub channel_name: String,
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    /// Comma-separated face values, e.g. `"50,100"`.
    #[serde(default)]
    pub face_values: String,
    #[serde(default)]
    pub min_settle_amounts: String,
    #[serde(default)]
    pub provinces: String,
    /// 1 enabled, 2 disabled.
    pub status: i32,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub official_payment: i64,
    #[serde(default)]
    pub user_quote_type: i32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfigQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_account_id: Option<i64>,
}

impl Default for TaskConfigQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            platform_account_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskConfig {
    pub platform_id: i64,
    pub platform_account_id: i64,
    pub channel_id: i64,
    pub product_id: String,
    pub face_values: String,
    pub min_settle_amounts: String,
    #[serde(default)]
    pub provinces: String,
    pub status: i32,
    pub official_payment: i64,
    pub user_quote_type: i32,
}

/// Partial update; the server applies only the fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskConfig {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_settle_amounts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_payment: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_quote_type: Option<i32>,
}

/// The server emits `official_payment` as a number but older rows hold it
/// as a string; accept both, with `""` meaning zero.
fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v as i64),
        Raw::Text(s) if s.trim().is_empty() => Ok(0),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|v| v as i64)
            .map_err(serde::de::Error::custom),
    }
}

pub fn list(query: &TaskConfigQuery) -> Result<Call<Page<TaskConfig>>, ApiError> {
    Call::get_with("/task-config", query)
}

pub fn get(id: i64) -> Call<TaskConfig> {
    Call::get(format!("/task-config/{id}"))
}

pub fn create(input: &CreateTaskConfig) -> Result<Call<Ack>, ApiError> {
    Call::post("/task-config", input)
}

pub fn update(input: &UpdateTaskConfig) -> Result<Call<Ack>, ApiError> {
    Call::put("/task-config", input)
}

pub fn delete(id: i64) -> Call<Ack> {
    Call::delete(format!("/task-config/{id}"))
}
