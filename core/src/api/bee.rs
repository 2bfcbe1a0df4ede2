//! Product pricing on the Bee (蜜蜂) supplier platform, per platform account.

use serde::{Deserialize, Serialize};

use super::{Ack, Page};
use crate::client::Call;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeProvince {
    pub prov: String,
    #[serde(default)]
    pub user_quote_payment: f64,
    #[serde(default)]
    pub external_code: String,
    #[serde(default)]
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteStockInfo {
    pub id: i64,
    #[serde(default)]
    pub user_quote_payment: String,
    #[serde(default)]
    pub usable_stock: i64,
    #[serde(default)]
    pub prov_limit_type: i32,
    #[serde(default)]
    pub user_quote_type: i32,
    #[serde(default)]
    pub external_code_link_type: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteStockProvInfo {
    pub id: i64,
    pub quote_id: i64,
    pub goods_id: i64,
    pub prov: String,
    #[serde(default)]
    pub prov_id: i64,
    #[serde(default)]
    pub user_quote_payment: String,
    #[serde(default)]
    pub user_quote_discount: f64,
    #[serde(default)]
    pub external_code: String,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub pin_yin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeeProduct {
    pub goods_id: i64,
    pub goods_name: String,
    #[serde(default)]
    pub goods_type: i32,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub user_quote_payment: f64,
    #[serde(default)]
    pub prov_limit_type: i32,
    #[serde(default)]
    pub user_quote_type: i32,
    #[serde(default)]
    pub external_code_link_type: i32,
    #[serde(default)]
    pub external_code: String,
    #[serde(default)]
    pub prov_info: Vec<BeeProvince>,
    #[serde(default)]
    pub user_quote_stock_info: Option<QuoteStockInfo>,
    #[serde(default)]
    pub user_quote_stock_prov_info: Vec<QuoteStockProvInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goods_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            goods_name: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePrice {
    pub goods_id: i64,
    pub status: i32,
    pub prov_limit_type: i32,
    pub user_quote_type: i32,
    pub external_code_link_type: i32,
    pub user_quote_payment: f64,
    pub external_code: String,
    pub prov_info: Vec<BeeProvince>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProvince {
    pub goods_id: i64,
    pub provs: Vec<String>,
}

pub fn products(account_id: i64, query: &ProductQuery) -> Result<Call<Page<BeeProduct>>, ApiError> {
    Call::get_with(format!("/platform/bee/accounts/{account_id}/products"), query)
}

pub fn update_price(account_id: i64, input: &UpdatePrice) -> Result<Call<Ack>, ApiError> {
    Call::put(format!("/platform/bee/accounts/{account_id}/products/price"), input)
}

pub fn update_province(account_id: i64, input: &UpdateProvince) -> Result<Call<Ack>, ApiError> {
    Call::put(format!("/platform/bee/accounts/{account_id}/products/province"), input)
}
