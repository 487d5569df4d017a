use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::entities::TransactionKind;
use crate::error::AppError;
use crate::services::catalog::{self, VoucherListing, VoucherView};
use crate::services::checkout::CreateTransactionRequest;
use crate::services::ledger::TransactionView;
use crate::state::AppState;
use crate::utils::PageParams;

use super::transactions;

/// Voucher catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vouchers))
        .route("/{id}", get(get_voucher))
        .route("/{id}/buy", get(buy_form).post(buy))
}

#[derive(Debug, Deserialize)]
pub struct VoucherQuery {
    platform: Option<String>,
    page: Option<u64>,
    per_page: Option<u64>,
}

impl VoucherQuery {
    const fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// `GET /vouchers`: in-stock active vouchers and the platform list.
async fn list_vouchers(
    State(state): State<AppState>,
    Query(query): Query<VoucherQuery>,
) -> Result<Json<VoucherListing>, AppError> {
    let platform = query.platform.as_deref().filter(|p| !p.is_empty());
    Ok(Json(
        catalog::list_active_vouchers(&state.db, query.page_params(), platform).await?,
    ))
}

async fn get_voucher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VoucherView>, AppError> {
    Ok(Json(catalog::get_voucher(&state.db, id).await?))
}

/// `GET /vouchers/{id}/buy`: forward to the purchase form.
async fn buy_form(AuthUser(_user): AuthUser, Path(voucher_id): Path<Uuid>) -> Redirect {
    Redirect::to(&format!(
        "/transactions/create?type={}&voucher_id={voucher_id}",
        TransactionKind::Voucher
    ))
}

/// `POST /vouchers/{id}/buy`: create a voucher purchase with the path id.
async fn buy(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(voucher_id): Path<Uuid>,
    Json(body): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionView>), AppError> {
    let request = CreateTransactionRequest {
        kind: Some(TransactionKind::Voucher.as_str().to_string()),
        voucher_id: Some(voucher_id.to_string()),
        ..body
    };
    transactions::store(&state, user.id, &request).await
}
