//! Lost and found pet reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Lost,
    Found,
}

impl ReportType {
    /// Get string representation for database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored report. Append-only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LostFoundReport {
    pub id: i64,
    pub user_name: String,
    pub report_type: String,
    pub pet_name: String,
    pub pet_type: String,
    pub breed: String,
    pub color: String,
    pub location: String,
    /// Free-form date as entered by the reporter.
    pub date: String,
    pub contact_phone: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl LostFoundReport {
    /// Get parsed report type.
    pub fn parsed_type(&self) -> Option<ReportType> {
        match self.report_type.as_str() {
            "lost" => Some(ReportType::Lost),
            "found" => Some(ReportType::Found),
            _ => None,
        }
    }
}

/// Input for `POST /api/lost-found`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLostFoundReport {
    #[validate(length(min = 1, max = 50, message = "User name is required"))]
    pub user_name: String,

    pub report_type: ReportType,

    #[validate(length(min = 1, max = 50, message = "Pet name is required"))]
    pub pet_name: String,

    #[serde(default)]
    #[validate(length(max = 30))]
    pub pet_type: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub breed: String,

    #[serde(default)]
    #[validate(length(max = 50))]
    pub color: String,

    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    #[validate(length(max = 20))]
    pub date: String,

    #[validate(length(min = 1, max = 20, message = "Contact phone is required"))]
    pub contact_phone: String,

    #[serde(default)]
    pub description: String,
}
