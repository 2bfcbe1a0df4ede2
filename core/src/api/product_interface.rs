//! Upstream recharge interfaces and their assignment to products.
//!
//! The two reads here feed selection widgets that must still render when the
//! backend hiccups, so they degrade to an empty list. Assignment is a
//! mutation and propagates.

use serde::{Deserialize, Serialize};

use super::{Ack, ListOf, PageQuery};
use crate::client::Call;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInterface {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: i32,
    #[serde(rename = "type", default)]
    pub kind: i32,
    #[serde(default)]
    pub isp: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub product_id: i64,
    pub interface_ids: Vec<i64>,
}

#[derive(Serialize)]
struct ForProduct {
    product_id: i64,
    #[serde(flatten)]
    paging: PageQuery,
}

pub fn for_product(product_id: i64, paging: PageQuery) -> Result<Call<ListOf<ApiInterface>>, ApiError> {
    Ok(Call::get_with("/product-api-relations", &ForProduct { product_id, paging })?.degrade())
}

pub fn all(paging: PageQuery) -> Result<Call<ListOf<ApiInterface>>, ApiError> {
    Ok(Call::get_with("/platform/api", &paging)?.degrade())
}

pub fn assign(product_id: i64, interface_ids: Vec<i64>) -> Result<Call<Ack>, ApiError> {
    Call::post(
        "/product-api-relations",
        &Assignment {
            product_id,
            interface_ids,
        },
    )
}
