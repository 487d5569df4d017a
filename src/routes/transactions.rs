use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::services::checkout::{self, CreateTransactionRequest, PurchaseContext, PurchaseQuery};
use crate::services::ledger::{self, TransactionDetail, TransactionView};
use crate::services::payment;
use crate::state::AppState;
use crate::utils::{Page, PageParams};

/// Ledger and checkout router. Every route requires a signed-in user.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/create", get(purchase_form))
        .route(
            "/{id}",
            get(show_transaction)
                .put(process_payment)
                .patch(process_payment),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    page: Option<u64>,
    per_page: Option<u64>,
}

impl ListQuery {
    const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Shared by `POST /transactions` and the buy shortcuts.
pub async fn store(
    state: &AppState,
    user_id: Uuid,
    request: &CreateTransactionRequest,
) -> Result<(StatusCode, Json<TransactionView>), AppError> {
    let created = checkout::create_transaction(&state.db, user_id, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /transactions`: the caller's transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TransactionView>>, AppError> {
    let page = ledger::list_my_transactions(
        &state.db,
        user.id,
        query.status.as_deref(),
        query.page_params(),
    )
    .await?;
    Ok(Json(page))
}

/// `GET /transactions/create`: data for the purchase form.
async fn purchase_form(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Query(query): Query<PurchaseQuery>,
) -> Result<Json<PurchaseContext>, AppError> {
    Ok(Json(checkout::purchase_context(&state.db, &query).await?))
}

/// `POST /transactions`: record a pending purchase.
async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionView>), AppError> {
    store(&state, user.id, &request).await
}

/// `GET /transactions/{id}`: one of the caller's transactions.
async fn show_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionDetail>, AppError> {
    Ok(Json(ledger::get_my_transaction(&state.db, id, user.id).await?))
}

/// `PUT|PATCH /transactions/{id}`: run payment for a pending transaction.
async fn process_payment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, AppError> {
    let updated =
        payment::process_payment(&state.db, state.payment_gateway.as_ref(), id, user.id).await?;
    Ok(Json(updated))
}
