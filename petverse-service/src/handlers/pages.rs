use axum::{
    extract::{Path, State},
    http::Uri,
    response::Html,
};
use service_core::error::AppError;

use crate::AppState;

/// Fixed page routes (`/`, `/login`, `/pets`, ...).
pub async fn fixed_page(State(state): State<AppState>, uri: Uri) -> Result<Html<String>, AppError> {
    let page = uri.path().trim_start_matches('/');
    Ok(Html(state.pages.render(page).await?))
}

/// `GET /{page}`: serves `{page}.html` when it exists, the home page otherwise.
pub async fn any_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.render(&page).await?))
}
