//! Adoption history records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::pet::image_path;

/// Adoption record. `pet_name` is a snapshot of the pet's name when it was
/// adopted, not a live reference.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Adoption {
    pub id: i64,
    pub user_name: String,
    pub pet_id: i64,
    pub pet_name: String,
}

/// An adoption joined with the current pet row.
#[derive(Debug, Clone, FromRow)]
pub struct AdoptionRow {
    pub pet_name: String,
    #[sqlx(rename = "type")]
    pub pet_type: String,
    pub age: i64,
    pub description: String,
    pub image: String,
}

/// Adoption as returned by `GET /api/adoptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionView {
    pub pet_name: String,
    #[serde(rename = "type")]
    pub pet_type: String,
    pub age: String,
    pub description: String,
    pub image: String,
    pub user_name: String,
}

impl AdoptionView {
    pub fn from_row(row: AdoptionRow, user_name: &str) -> Self {
        Self {
            pet_name: row.pet_name,
            pet_type: row.pet_type,
            age: format!("{} years", row.age),
            description: row.description,
            image: image_path(&row.image),
            user_name: user_name.to_string(),
        }
    }
}

/// Result of an adoption attempt. Only `Adopted` changes the store.
#[derive(Debug, Clone)]
pub enum AdoptionOutcome {
    Adopted(Adoption),
    AlreadyAdopted,
    PetNotFound,
}

impl AdoptionOutcome {
    /// Metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adopted(_) => "adopted",
            Self::AlreadyAdopted => "already_adopted",
            Self::PetNotFound => "not_found",
        }
    }
}

/// Rows touched by a bulk reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetSummary {
    pub pets_released: u64,
    pub adoptions_removed: u64,
}
