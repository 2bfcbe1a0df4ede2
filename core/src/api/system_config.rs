//! System configuration entries, the system name, and the public
//! (unauthenticated) system endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Ack, Page};
use crate::client::Call;
use crate::error::ApiError;

/// Type tag of a configuration value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    #[default]
    String,
    Number,
    Boolean,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub id: i64,
    pub config_key: String,
    #[serde(default)]
    pub config_value: String,
    #[serde(default)]
    pub config_desc: String,
    #[serde(default)]
    pub config_type: ConfigType,
    #[serde(default)]
    pub is_system: i32,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_key: Option<String>,
}

impl Default for ConfigQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            config_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfig {
    pub config_key: String,
    pub config_value: String,
    #[serde(default)]
    pub config_desc: String,
    #[serde(default)]
    pub config_type: ConfigType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    pub config_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_type: Option<ConfigType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemName {
    pub system_name: String,
}

/// All configuration values keyed by name, plus runtime facts about the
/// server process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub configs: BTreeMap<String, String>,
    #[serde(default)]
    pub system_info: BTreeMap<String, Value>,
}

/// Branding shown before login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default)]
    pub system_name: String,
    #[serde(default)]
    pub system_logo: String,
}

pub fn list(query: &ConfigQuery) -> Result<Call<Page<SystemConfig>>, ApiError> {
    Call::get_with("/system-config", query)
}

pub fn get(id: i64) -> Call<SystemConfig> {
    Call::get(format!("/system-config/{id}"))
}

/// The key is percent-encoded as a single path segment.
pub fn get_by_key(key: &str) -> Call<SystemConfig> {
    Call::get(format!("/system-config/key/{}", urlencoding::encode(key)))
}

pub fn create(input: &CreateConfig) -> Result<Call<Ack>, ApiError> {
    Call::post("/system-config", input)
}

pub fn update(id: i64, input: &UpdateConfig) -> Result<Call<Ack>, ApiError> {
    Call::put(format!("/system-config/{id}"), input)
}

pub fn delete(id: i64) -> Call<Ack> {
    Call::delete(format!("/system-config/{id}"))
}

pub fn batch_update(values: &BTreeMap<String, String>) -> Result<Call<Ack>, ApiError> {
    Call::put("/system-config/batch", values)
}

pub fn system_name() -> Call<SystemName> {
    Call::get("/system-config/system-name")
}

pub fn update_system_name(name: &str) -> Result<Call<Ack>, ApiError> {
    Call::put(
        "/system-config/system-name",
        &SystemName {
            system_name: name.to_string(),
        },
    )
}

pub fn system_info() -> Call<SystemInfo> {
    Call::get("/system-config/system-info")
}

/// Loading screens must never fail on branding, so this degrades to an
/// empty record.
pub fn public_basic_info() -> Call<BasicInfo> {
    Call::get("/public/system/basic-info").degrade()
}

pub fn public_system_name() -> Call<SystemName> {
    Call::get("/public/system/name")
}
