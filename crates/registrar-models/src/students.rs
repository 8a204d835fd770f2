//! Student domain models and DTOs.
//!
//! The HTTP layer treats these as pass-through containers. A request DTO is
//! handed to the student service exactly as it was deserialized, and whatever
//! the service returns is serialized back unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A student record as stored by the student service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub class_id: Option<i64>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub section_id: Option<i64>,
    #[serde(rename = "section")]
    pub section_name: Option<String>,
    pub roll: Option<i32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub status: String,
    /// Identity that last changed `status`
    pub reviewer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `GET /students`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

/// Filter, sort and pagination options for listing students.
///
/// All values are forwarded verbatim as received in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudentListQuery {
    /// Restrict to one student id
    pub user_id: Option<String>,
    pub class_id: Option<String>,
    pub section_id: Option<String>,
    /// Case-insensitive name fragment
    pub name: Option<String>,
    /// One of `id`, `name`, `email`, `roll`, `admissionDate`, `createdAt`
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Student fields accepted on create and update.
///
/// Identifiers in the body (`userId`, `id`) are not part of the payload; on
/// update the target comes from the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub class_id: Option<i64>,
    pub section_id: Option<i64>,
    pub roll: Option<i32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub admission_date: Option<NaiveDate>,
}

/// Update request handed to the student service.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentUpdate {
    pub user_id: String,
    pub fields: StudentPayload,
}

/// Body of `PATCH /students/{id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentStatusDto {
    pub status: Option<String>,
}

/// Status change handed to the student service.
///
/// `reviewer_id` always comes from the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentStatusChange {
    pub user_id: String,
    pub reviewer_id: String,
    pub status: Option<String>,
}

/// Lifecycle states a student record can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Inactive,
    Suspended,
    Graduated,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 4] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Suspended,
        StudentStatus::Graduated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Suspended => "suspended",
            StudentStatus::Graduated => "graduated",
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StudentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid student status: {}", s))
    }
}
