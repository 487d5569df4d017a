//! Per-user transaction history.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::transaction::GameDetails;
use crate::entities::{PurchasedItem, TransactionStatus, game, transaction, voucher};
use crate::error::AppError;
use crate::services::catalog::{self, GameView, VoucherView, format_price};
use crate::utils::{Page, PageParams};

pub const LEDGER_PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    pub id: Uuid,
    pub transaction_id: String,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub item_id: Uuid,
    pub item_name: String,
    pub amount: String,
    pub status: String,
    pub payment_method: String,
    pub payment_gateway_id: Option<String>,
    pub payment_details: Option<serde_json::Value>,
    pub game_details: Option<GameDetails>,
    pub paid_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<transaction::Model> for TransactionView {
    fn from(t: transaction::Model) -> Self {
        let game_details = t.game_details();
        Self {
            id: t.id,
            transaction_id: t.transaction_id,
            user_id: t.user_id,
            kind: t.kind,
            item_id: t.item_id,
            item_name: t.item_name,
            amount: format_price(t.amount),
            status: t.status,
            payment_method: t.payment_method,
            payment_gateway_id: t.payment_gateway_id,
            payment_details: t.payment_details,
            game_details,
            paid_at: t.paid_at.map(|ts| ts.to_rfc3339()),
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// The catalog row a transaction was made against, loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedItem {
    Game(GameView),
    Voucher(VoucherView),
}

/// Which screen the client should show for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailView {
    Success,
    Failed,
    /// Still awaiting payment
    Payment,
}

impl From<Option<TransactionStatus>> for DetailView {
    fn from(status: Option<TransactionStatus>) -> Self {
        match status {
            Some(TransactionStatus::Success) => Self::Success,
            Some(TransactionStatus::Failed) => Self::Failed,
            _ => Self::Payment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionDetail {
    pub view: DetailView,
    pub transaction: TransactionView,
    /// `None` when the catalog row has since been deleted.
    pub item: Option<ResolvedItem>,
}

/// Load a transaction and check it belongs to `user_id`.
///
/// # Errors
///
/// `NotFound` for an unknown id, `Forbidden` for someone else's transaction.
pub async fn find_owned<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<transaction::Model, AppError> {
    let txn = transaction::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

    if txn.user_id != user_id {
        return Err(AppError::Forbidden(
            "You do not have access to this transaction".to_string(),
        ));
    }

    Ok(txn)
}

pub async fn resolve_item<C: ConnectionTrait>(
    db: &C,
    item: PurchasedItem,
) -> Result<Option<ResolvedItem>, AppError> {
    match item {
        PurchasedItem::Game(id) => {
            let Some(game) = game::Entity::find_by_id(id).one(db).await? else {
                return Ok(None);
            };
            Ok(catalog::load_game_views(db, vec![game])
                .await?
                .pop()
                .map(ResolvedItem::Game))
        }
        PurchasedItem::Voucher(id) => Ok(voucher::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(|v| ResolvedItem::Voucher(v.into()))),
    }
}

/// The user's transactions, newest first, optionally narrowed to one status.
///
/// An empty `status` is treated as no filter.
///
/// # Errors
///
/// `Validation` on `status` when it names no known status.
pub async fn list_my_transactions<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    status: Option<&str>,
    params: PageParams,
) -> Result<Page<TransactionView>, AppError> {
    let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            TransactionStatus::from_str(raw)
                .ok_or_else(|| AppError::field("status", "The selected status is invalid."))?,
        ),
        None => None,
    };

    let page = params.page();
    let per_page = params.per_page(LEDGER_PAGE_SIZE);

    let mut query = transaction::Entity::find().filter(transaction::Column::UserId.eq(user_id));
    if let Some(status) = status {
        query = query.filter(transaction::Column::Status.eq(status.as_str()));
    }

    let total = query.clone().count(db).await?;
    let rows = query
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .offset((page - 1) * per_page)
        .limit(per_page)
        .all(db)
        .await?;

    Ok(Page::new(rows, page, per_page, total).map(Into::into))
}

/// One of the user's transactions with its purchased item loaded.
///
/// # Errors
///
/// `NotFound` for an unknown id, `Forbidden` for someone else's transaction.
pub async fn get_my_transaction<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    user_id: Uuid,
) -> Result<TransactionDetail, AppError> {
    let txn = find_owned(db, id, user_id).await?;

    let item = match txn.purchased_item() {
        Some(item) => resolve_item(db, item).await?,
        None => None,
    };

    Ok(TransactionDetail {
        view: txn.status().into(),
        transaction: txn.into(),
        item,
    })
}
