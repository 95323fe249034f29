//! Adoption workflow: adopting a pet, per-user history, and the bulk reset.

use crate::models::{AdoptionOutcome, AdoptionView, ResetSummary};
use crate::services::metrics::{ADOPTIONS_TOTAL, RESETS_TOTAL};
use crate::services::Database;
use service_core::error::AppError;

#[derive(Clone)]
pub struct AdoptionService {
    db: Database,
}

impl AdoptionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Adopt `pet_id` on behalf of `user_name`.
    ///
    /// An already adopted pet is reported as [`AdoptionOutcome::AlreadyAdopted`]
    /// and leaves the history untouched.
    pub async fn adopt(&self, user_name: &str, pet_id: i64) -> Result<AdoptionOutcome, AppError> {
        let result = self.db.adopt_pet(user_name, pet_id).await;

        let label = match &result {
            Ok(outcome) => outcome.as_str(),
            Err(_) => "error",
        };
        ADOPTIONS_TOTAL.with_label_values(&[label]).inc();

        result
    }

    pub async fn list_adoptions_for(&self, user_name: &str) -> Result<Vec<AdoptionView>, AppError> {
        let rows = self.db.list_adoptions_for(user_name).await?;
        Ok(rows
            .into_iter()
            .map(|row| AdoptionView::from_row(row, user_name))
            .collect())
    }

    /// Return every pet to the catalog and clear all adoption records.
    pub async fn reset_all(&self) -> Result<ResetSummary, AppError> {
        let result = self.db.reset_adoptions().await;

        let status = if result.is_ok() { "ok" } else { "error" };
        RESETS_TOTAL.with_label_values(&[status]).inc();

        result
    }
}
