//! Platform user listing.

use serde::{Deserialize, Serialize};

use super::Records;
use crate::client::Call;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub status: i32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub credit_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListQuery {
    pub page: u32,
    pub page_size: u32,
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<i32>,
    pub balance_min: Option<f64>,
    pub balance_max: Option<f64>,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            user_name: None,
            phone: None,
            email: None,
            status: None,
            balance_min: None,
            balance_max: None,
        }
    }
}

/// Wire form of `UserListQuery`: the server pages by `current` / `size`.
#[derive(Serialize)]
struct UserListParams<'a> {
    current: u32,
    size: u32,
    user_name: Option<&'a str>,
    phone: Option<&'a str>,
    email: Option<&'a str>,
    status: Option<i32>,
    balance_min: Option<f64>,
    balance_max: Option<f64>,
}

impl<'a> From<&'a UserListQuery> for UserListParams<'a> {
    fn from(q: &'a UserListQuery) -> Self {
        Self {
            current: q.page,
            size: q.page_size,
            user_name: q.user_name.as_deref(),
            phone: q.phone.as_deref(),
            email: q.email.as_deref(),
            status: q.status,
            balance_min: q.balance_min,
            balance_max: q.balance_max,
        }
    }
}

pub fn list(query: &UserListQuery) -> Result<Call<Records<User>>, ApiError> {
    Call::get_with("/users/list", &UserListParams::from(query))
}
