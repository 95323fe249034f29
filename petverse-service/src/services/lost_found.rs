//! Lost and found pet reports.

use crate::models::{CreateLostFoundReport, LostFoundReport, ReportType};
use crate::services::Database;
use service_core::error::AppError;
use validator::Validate;

#[derive(Clone)]
pub struct LostFoundService {
    db: Database,
}

impl LostFoundService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create_report(
        &self,
        input: CreateLostFoundReport,
    ) -> Result<LostFoundReport, AppError> {
        input.validate()?;
        self.db.create_lost_found_report(&input).await
    }

    pub async fn list_reports(
        &self,
        report_type: Option<ReportType>,
    ) -> Result<Vec<LostFoundReport>, AppError> {
        self.db.list_lost_found_reports(report_type).await
    }
}
