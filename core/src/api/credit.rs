//! Credit limits granted to users, and their change log.

use serde::{Deserialize, Serialize};

use super::{Ack, Page};
use crate::client::Call;
use crate::error::ApiError;

pub const TYPE_SET: i32 = 1;
pub const TYPE_USE: i32 = 2;
pub const TYPE_RESTORE: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditSetRequest {
    pub user_id: i64,
    #[serde(rename = "creditLimit")]
    pub credit_limit: f64,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLogQuery {
    #[serde(rename = "current")]
    pub page: u32,
    #[serde(rename = "size")]
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

impl Default for CreditLogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            user_id: None,
            kind: None,
            order_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLog {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(default)]
    pub credit_before: f64,
    #[serde(default)]
    pub credit_after: f64,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub created_at: String,
}

pub fn set_limit(input: &CreditSetRequest) -> Result<Call<Ack>, ApiError> {
    Call::post("/credit/set", input)
}

pub fn logs(query: &CreditLogQuery) -> Result<Call<Page<CreditLog>>, ApiError> {
    Call::get_with("/credit/logs", query)
}
