//! Read-only pet catalog.

use crate::models::PetView;
use crate::services::Database;
use service_core::error::AppError;

#[derive(Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Pets still available for adoption, in insertion order.
    pub async fn list_available_pets(&self) -> Result<Vec<PetView>, AppError> {
        let pets = self.db.list_available_pets().await?;
        Ok(pets.into_iter().map(PetView::from).collect())
    }
}
