//! Typed endpoint functions, one module per backend domain.
//!
//! Every function maps one semantic operation onto exactly one request and
//! returns a `Call` for `AdminClient::execute`. Nothing is validated here;
//! the server owns validation. Paths are relative to the configured base URL.

pub mod balance;
pub mod bee;
pub mod credit;
pub mod external_api_key;
pub mod platform;
pub mod product;
pub mod product_interface;
pub mod statistics;
pub mod system_config;
pub mod task_config;
pub mod user;
pub mod user_grade;

use serde::{Deserialize, Deserializer, Serialize};

/// Result type of mutations whose `data` carries nothing the caller needs.
pub type Ack = serde::de::IgnoredAny;

/// `{list, total}` page returned by most list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total: 0,
        }
    }
}

/// `{records, total, current, size}` page used by the user-facing lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Records<T> {
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            current: 1,
            size: 0,
        }
    }
}

/// Plain `page` / `page_size` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

/// The rows of a `{list, total}` page, dropping the total. A missing or
/// `null` list reads as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOf<T>(pub Vec<T>);

impl<T> ListOf<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for ListOf<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ListOf<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw<T> {
            #[serde(default = "Option::default")]
            list: Option<Vec<T>>,
        }
        let raw = Raw::<T>::deserialize(deserializer)?;
        Ok(Self(raw.list.unwrap_or_default()))
    }
}
