//! Manual balance adjustments and the balance change log.

use serde::{Deserialize, Serialize};

use super::Page;
use crate::client::Call;
use crate::error::ApiError;

/// `style` values of a balance change.
pub const STYLE_ORDER_DEDUCT: i32 = 1;
pub const STYLE_REFUND: i32 = 2;
pub const STYLE_MANUAL: i32 = 3;
pub const STYLE_RECHARGE: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RechargeRequest {
    pub user_id: i64,
    pub amount: f64,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductRequest {
    pub user_id: i64,
    pub amount: f64,
    pub style: i32,
    pub remark: String,
}

/// Identifier of the balance log entry a mutation created, when the server
/// reports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReceipt {
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// One balance movement. `kind` is 1 for income, 2 for expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceLog {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub platform_name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: i32,
    pub style: i32,
    pub balance: f64,
    #[serde(default)]
    pub balance_before: f64,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub created_at: String,
}

pub fn recharge(input: &RechargeRequest) -> Result<Call<Option<BalanceReceipt>>, ApiError> {
    Call::post("/balance/recharge", input)
}

pub fn deduct(input: &DeductRequest) -> Result<Call<Option<BalanceReceipt>>, ApiError> {
    Call::post("/balance/deduct", input)
}

pub fn logs(query: &LogQuery) -> Result<Call<Page<BalanceLog>>, ApiError> {
    Call::get_with("/balance/logs", query)
}
