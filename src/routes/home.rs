use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppError;
use crate::services::catalog::{self, HomeSummary};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
}

/// `GET /` and `GET /home`: categories, popular games and featured vouchers.
async fn home(State(state): State<AppState>) -> Result<Json<HomeSummary>, AppError> {
    Ok(Json(catalog::home_summary(&state.db).await?))
}
