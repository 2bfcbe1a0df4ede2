//! Product catalog.

use serde::{Deserialize, Serialize};

use super::Records;
use crate::client::Call;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: i32,
    #[serde(default)]
    pub category_id: i64,
    /// Comma-separated operator codes, see `isp::format_isp`.
    #[serde(default)]
    pub isp: String,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub max_price: f64,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub api_enabled: bool,
    #[serde(default)]
    pub is_decode: bool,
    #[serde(default)]
    pub show_style: i32,
    #[serde(default)]
    pub allow_province: String,
    #[serde(default)]
    pub allow_city: String,
    #[serde(default)]
    pub forbid_province: String,
    #[serde(default)]
    pub forbid_city: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub category: Option<ProductCategory>,
}

pub fn list() -> Call<Records<Product>> {
    Call::get("/product/list")
}
