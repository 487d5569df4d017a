//! Purchase intents: validating a request against the catalog and recording
//! it as a pending transaction.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::transaction::GameDetails;
use crate::entities::{
    PaymentMethod, PurchasedItem, TransactionKind, TransactionStatus, game, game_package,
    transaction, voucher,
};
use crate::error::{AppError, FieldErrors};
use crate::services::catalog::{self, GameView, PackageView, VoucherView};
use crate::services::ledger::TransactionView;
use crate::utils::generate_transaction_id;

/// Body of `POST /transactions`. Every field is optional on the wire so a
/// bad request yields per-field messages instead of a parse failure.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub game_id: Option<String>,
    pub package_id: Option<String>,
    /// Buyer's in-game account identifier
    pub user_id: Option<String>,
    pub server: Option<String>,
    pub payment_method: Option<String>,
    pub voucher_id: Option<String>,
}

/// Query of `GET /transactions/create`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PurchaseQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub game_id: Option<String>,
    pub package_id: Option<String>,
    pub voucher_id: Option<String>,
}

/// What the purchase form needs to render.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PurchaseContext {
    GameTopup {
        game: GameView,
        package: PackageView,
    },
    Voucher {
        voucher: VoucherView,
    },
}

fn parse_kind(kind: Option<&str>) -> Result<TransactionKind, AppError> {
    kind.and_then(TransactionKind::from_str)
        .ok_or_else(|| AppError::NotFound("Unknown transaction type".to_string()))
}

fn parse_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
}

fn filled(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Record a required free-text field, returning its trimmed value.
fn require_text(errors: &mut FieldErrors, field: &'static str, raw: Option<&str>) -> String {
    filled(raw).map_or_else(
        || {
            errors.insert(field, format!("The {} field is required.", field.replace('_', " ")));
            String::new()
        },
        str::to_string,
    )
}

fn require_payment_method(errors: &mut FieldErrors, raw: Option<&str>) -> Option<PaymentMethod> {
    match filled(raw) {
        None => {
            errors.insert("payment_method", "The payment method field is required.".to_string());
            None
        }
        Some(s) => PaymentMethod::from_str(s).or_else(|| {
            errors.insert(
                "payment_method",
                "The selected payment method is invalid.".to_string(),
            );
            None
        }),
    }
}

/// Look up a required catalog reference, recording a field error when it is
/// missing, malformed or names no row.
async fn require_row<C, E>(
    db: &C,
    errors: &mut FieldErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<E::Model>, AppError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    <E::PrimaryKey as sea_orm::PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    let label = field.replace('_', " ");
    if filled(raw).is_none() {
        errors.insert(field, format!("The {label} field is required."));
        return Ok(None);
    }
    let row = match parse_id(raw) {
        Some(id) => E::find_by_id(id).one(db).await?,
        None => None,
    };
    if row.is_none() {
        errors.insert(field, format!("The selected {label} is invalid."));
    }
    Ok(row)
}

/// Load what the purchase form for `query` shows.
///
/// # Errors
///
/// `NotFound` for an unknown type or when a referenced row does not exist.
pub async fn purchase_context<C: ConnectionTrait>(
    db: &C,
    query: &PurchaseQuery,
) -> Result<PurchaseContext, AppError> {
    match parse_kind(query.kind.as_deref())? {
        TransactionKind::GameTopup => {
            let game_id = parse_id(query.game_id.as_deref())
                .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;
            let package_id = parse_id(query.package_id.as_deref())
                .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

            let game = catalog::get_game(db, game_id).await?;
            let package = game_package::Entity::find_by_id(package_id)
                .one(db)
                .await?
                .ok_or_else(|| AppError::NotFound("Package not found".to_string()))?;

            Ok(PurchaseContext::GameTopup {
                game,
                package: package.into(),
            })
        }
        TransactionKind::Voucher => {
            let voucher_id = parse_id(query.voucher_id.as_deref())
                .ok_or_else(|| AppError::NotFound("Voucher not found".to_string()))?;
            Ok(PurchaseContext::Voucher {
                voucher: catalog::get_voucher(db, voucher_id).await?,
            })
        }
    }
}

/// Validate `request` and record it as a pending transaction owned by `user_id`.
///
/// # Errors
///
/// `NotFound` for an unknown type, `Validation` listing every bad field,
/// `OutOfStock` when a voucher has no units left.
pub async fn create_transaction(
    db: &DatabaseConnection,
    user_id: Uuid,
    request: &CreateTransactionRequest,
) -> Result<TransactionView, AppError> {
    match parse_kind(request.kind.as_deref())? {
        TransactionKind::GameTopup => create_game_topup(db, user_id, request).await,
        TransactionKind::Voucher => create_voucher_purchase(db, user_id, request).await,
    }
}

struct NewTransaction {
    user_id: Uuid,
    item: PurchasedItem,
    item_name: String,
    amount: Decimal,
    payment_method: PaymentMethod,
    game_details: Option<GameDetails>,
}

async fn insert_pending<C: ConnectionTrait>(
    db: &C,
    new: NewTransaction,
) -> Result<transaction::Model, AppError> {
    let now = Utc::now().fixed_offset();
    let game_details = new.game_details.map(serde_json::to_value).transpose()?;

    let model = transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        transaction_id: Set(generate_transaction_id()),
        user_id: Set(new.user_id),
        kind: Set(new.item.kind().as_str().to_string()),
        item_id: Set(new.item.id()),
        item_name: Set(new.item_name),
        amount: Set(new.amount),
        status: Set(TransactionStatus::Pending.as_str().to_string()),
        payment_method: Set(new.payment_method.as_str().to_string()),
        payment_gateway_id: Set(None),
        payment_details: Set(None),
        game_details: Set(game_details),
        paid_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    tracing::info!(
        transaction_id = %model.transaction_id,
        kind = %model.kind,
        amount = %model.amount,
        "Transaction created"
    );

    Ok(model)
}

async fn create_game_topup(
    db: &DatabaseConnection,
    user_id: Uuid,
    request: &CreateTransactionRequest,
) -> Result<TransactionView, AppError> {
    let mut errors = FieldErrors::new();

    let game = require_row::<_, game::Entity>(db, &mut errors, "game_id", request.game_id.as_deref())
        .await?;
    let package = require_row::<_, game_package::Entity>(
        db,
        &mut errors,
        "package_id",
        request.package_id.as_deref(),
    )
    .await?;
    let account_id = require_text(&mut errors, "user_id", request.user_id.as_deref());
    let server = require_text(&mut errors, "server", request.server.as_deref());
    let method = require_payment_method(&mut errors, request.payment_method.as_deref());

    let (Some(game), Some(package), Some(payment_method), true) =
        (game, package, method, errors.is_empty())
    else {
        return Err(AppError::Validation(errors));
    };

    let model = insert_pending(
        db,
        NewTransaction {
            user_id,
            item: PurchasedItem::Game(game.id),
            item_name: format!("{} - {}", game.name, package.name),
            amount: package.price,
            payment_method,
            game_details: Some(GameDetails {
                user_id: account_id,
                server,
                package: package.name,
                amount: package.amount,
                unit: package.unit,
            }),
        },
    )
    .await?;

    Ok(model.into())
}

async fn create_voucher_purchase(
    db: &DatabaseConnection,
    user_id: Uuid,
    request: &CreateTransactionRequest,
) -> Result<TransactionView, AppError> {
    let mut errors = FieldErrors::new();

    let voucher = require_row::<_, voucher::Entity>(
        db,
        &mut errors,
        "voucher_id",
        request.voucher_id.as_deref(),
    )
    .await?;
    let method = require_payment_method(&mut errors, request.payment_method.as_deref());

    let (Some(voucher), Some(payment_method), true) = (voucher, method, errors.is_empty()) else {
        return Err(AppError::Validation(errors));
    };

    // Stock check and decrement are one statement; the ledger row commits with it.
    let txn = db.begin().await?;

    let reserved = voucher::Entity::update_many()
        .col_expr(
            voucher::Column::Stock,
            Expr::col(voucher::Column::Stock).sub(1),
        )
        .col_expr(
            voucher::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(voucher::Column::Id.eq(voucher.id))
        .filter(voucher::Column::Stock.gt(0))
        .exec(&txn)
        .await?;

    if reserved.rows_affected == 0 {
        txn.rollback().await?;
        tracing::info!(voucher_id = %voucher.id, "Voucher out of stock");
        return Err(AppError::OutOfStock);
    }

    let model = insert_pending(
        &txn,
        NewTransaction {
            user_id,
            item: PurchasedItem::Voucher(voucher.id),
            item_name: voucher.name,
            amount: voucher.price,
            payment_method,
            game_details: None,
        },
    )
    .await?;

    txn.commit().await?;

    Ok(model.into())
}
