//! User grades (pricing tiers).

use serde::{Deserialize, Serialize};

use super::Ack;
use crate::client::Call;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGrade {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub grade_type: i32,
    pub status: i32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeListQuery {
    #[serde(rename = "current")]
    pub page: u32,
    #[serde(rename = "size")]
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
}

impl Default for GradeListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            name: None,
            grade_type: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeInput {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub grade_type: i32,
    pub status: i32,
}

pub fn list(query: &GradeListQuery) -> Result<Call<Vec<UserGrade>>, ApiError> {
    Call::get_with("/user-grades/list", query)
}

pub fn create(input: &GradeInput) -> Result<Call<UserGrade>, ApiError> {
    Call::post("/user-grades", input)
}

/// The id travels in both the path and the body, as the server expects.
pub fn update(id: i64, input: &GradeInput) -> Result<Call<UserGrade>, ApiError> {
    #[derive(Serialize)]
    struct WithId<'a> {
        id: i64,
        #[serde(flatten)]
        input: &'a GradeInput,
    }
    Call::put(format!("/user-grades/{id}"), &WithId { id, input })
}

pub fn delete(id: i64) -> Call<Ack> {
    Call::delete(format!("/user-grades/{id}"))
}
