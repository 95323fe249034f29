use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;

use crate::models::{CreateLostFoundReport, LostFoundReport, ReportType};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    pub report_type: Option<ReportType>,
}

/// `POST /api/lost-found`
pub async fn create_report(
    State(state): State<AppState>,
    Json(req): Json<CreateLostFoundReport>,
) -> Result<(StatusCode, Json<LostFoundReport>), AppError> {
    let report = state.lost_found.create_report(req).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// `GET /api/lost-found?report_type=`
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<Vec<LostFoundReport>>, AppError> {
    let reports = state.lost_found.list_reports(query.report_type).await?;
    Ok(Json(reports))
}
