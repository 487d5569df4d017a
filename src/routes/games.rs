use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::entities::TransactionKind;
use crate::error::AppError;
use crate::services::catalog::{self, GameListing, GameView};
use crate::services::checkout::CreateTransactionRequest;
use crate::services::ledger::TransactionView;
use crate::state::AppState;
use crate::utils::PageParams;

use super::transactions;

/// Game catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_games))
        .route("/{id}", get(get_game))
        .route("/{id}/topup/{package_id}", get(topup_form).post(topup))
}

/// `GET /games`: active games (paginated) and active categories.
async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<GameListing>, AppError> {
    Ok(Json(catalog::list_active_games(&state.db, params).await?))
}

/// `GET /games/{id}`: one game with its category and active packages.
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameView>, AppError> {
    Ok(Json(catalog::get_game(&state.db, id).await?))
}

/// `GET /games/{id}/topup/{package_id}`: forward to the purchase form.
async fn topup_form(
    AuthUser(_user): AuthUser,
    Path((game_id, package_id)): Path<(Uuid, Uuid)>,
) -> Redirect {
    Redirect::to(&format!(
        "/transactions/create?type={}&game_id={game_id}&package_id={package_id}",
        TransactionKind::GameTopup
    ))
}

/// `POST /games/{id}/topup/{package_id}`: create a top-up with the path ids.
async fn topup(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((game_id, package_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionView>), AppError> {
    let request = CreateTransactionRequest {
        kind: Some(TransactionKind::GameTopup.as_str().to_string()),
        game_id: Some(game_id.to_string()),
        package_id: Some(package_id.to_string()),
        ..body
    };
    transactions::store(&state, user.id, &request).await
}
