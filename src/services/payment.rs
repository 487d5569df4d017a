//! Payment resolution for pending transactions.
//!
//! The only gateway shipped is [`SimulatedGateway`], a weighted coin flip.
//! A real provider slots in by implementing [`PaymentGateway`] and handing it
//! to `AppState`.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use crate::entities::{PaymentMethod, TransactionStatus, transaction};
use crate::error::AppError;
use crate::services::ledger::{self, TransactionView};
use crate::utils::reference_code::generate_payment_reference_with;

/// Result of asking a gateway to collect a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved { gateway_reference: String },
    Declined,
}

impl PaymentOutcome {
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        match self {
            Self::Approved { .. } => TransactionStatus::Success,
            Self::Declined => TransactionStatus::Failed,
        }
    }
}

/// Boundary to whatever collects money for a transaction.
#[async_trait]
pub trait PaymentGateway: Send + Sync + Debug {
    async fn charge(&self, amount: Decimal, method: PaymentMethod) -> PaymentOutcome;
}

/// Approves when a uniform draw from `1..=10` is at least `success_threshold`.
///
/// The default threshold of 3 approves 80% of charges.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGateway {
    success_threshold: u8,
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SimulatedGateway {
    #[must_use]
    pub const fn new(success_threshold: u8) -> Self {
        Self { success_threshold }
    }

    /// Draw one outcome from `rng`.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> PaymentOutcome {
        let draw: u8 = rng.gen_range(1..=10);
        if draw >= self.success_threshold {
            PaymentOutcome::Approved {
                gateway_reference: generate_payment_reference_with(rng),
            }
        } else {
            PaymentOutcome::Declined
        }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, amount: Decimal, method: PaymentMethod) -> PaymentOutcome {
        let outcome = self.roll(&mut rand::thread_rng());
        tracing::debug!(%amount, %method, ?outcome, "Simulated charge");
        outcome
    }
}

/// Resolve a pending transaction owned by `user_id` through `gateway`.
///
/// The row is claimed inside a database transaction before the gateway is
/// asked to charge, and its lock is held until the outcome is written. A
/// concurrent call waits on that lock, then finds the row resolved and answers
/// `Conflict` without charging.
///
/// # Errors
///
/// `NotFound` for an unknown id, `Forbidden` when another user owns it,
/// `Conflict` when it is no longer pending.
pub async fn process_payment(
    db: &DatabaseConnection,
    gateway: &dyn PaymentGateway,
    id: Uuid,
    user_id: Uuid,
) -> Result<TransactionView, AppError> {
    let txn = ledger::find_owned(db, id, user_id).await?;

    if txn.status().is_none_or(|s| s.is_terminal()) {
        return Err(already_processed());
    }

    let method = txn.payment_method().ok_or_else(|| {
        anyhow::anyhow!(
            "Transaction {} has unknown payment method {:?}",
            txn.transaction_id,
            txn.payment_method
        )
    })?;

    let db_txn = db.begin().await?;

    let claimed = transaction::Entity::update_many()
        .col_expr(
            transaction::Column::UpdatedAt,
            Expr::value(Utc::now().fixed_offset()),
        )
        .filter(transaction::Column::Id.eq(txn.id))
        .filter(transaction::Column::Status.eq(TransactionStatus::Pending.as_str()))
        .exec(&db_txn)
        .await?;

    if claimed.rows_affected == 0 {
        db_txn.rollback().await?;
        return Err(already_processed());
    }

    let outcome = gateway.charge(txn.amount, method).await;
    let status = outcome.status();
    let now = Utc::now().fixed_offset();

    let mut update = transaction::Entity::update_many()
        .col_expr(transaction::Column::Status, Expr::value(status.as_str()))
        .col_expr(transaction::Column::UpdatedAt, Expr::value(now));
    if let PaymentOutcome::Approved { gateway_reference } = &outcome {
        update = update
            .col_expr(transaction::Column::PaidAt, Expr::value(now))
            .col_expr(
                transaction::Column::PaymentGatewayId,
                Expr::value(gateway_reference.clone()),
            );
    }

    update
        .filter(transaction::Column::Id.eq(txn.id))
        .exec(&db_txn)
        .await?;

    let updated = transaction::Entity::find_by_id(txn.id)
        .one(&db_txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

    db_txn.commit().await?;

    tracing::info!(
        transaction_id = %txn.transaction_id,
        status = %status,
        "Payment resolved"
    );

    Ok(updated.into())
}

fn already_processed() -> AppError {
    AppError::Conflict("Transaction has already been processed".to_string())
}
