use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PaymentMethod, PurchasedItem, TransactionKind, TransactionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Public reference, `TXN-` followed by 10 uppercase alphanumerics.
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub user_id: Uuid,
    pub kind: String,
    pub item_id: Uuid,
    pub item_name: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub status: String,
    pub payment_method: String,
    pub payment_gateway_id: Option<String>,
    pub payment_details: Option<Json>,
    pub game_details: Option<Json>,
    pub paid_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

/// Player-facing details captured for a game top-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetails {
    /// In-game account identifier typed by the buyer
    pub user_id: String,
    pub server: String,
    /// Package display name, e.g. `86 Diamonds`
    pub package: String,
    pub amount: i32,
    pub unit: String,
}

impl Model {
    /// Parsed status. Unknown stored values read as `None`.
    #[must_use]
    pub fn status(&self) -> Option<TransactionStatus> {
        TransactionStatus::from_str(&self.status)
    }

    #[must_use]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_str(&self.payment_method)
    }

    /// The purchased catalog row, resolved from the `kind` discriminant.
    #[must_use]
    pub fn purchased_item(&self) -> Option<PurchasedItem> {
        TransactionKind::from_str(&self.kind).map(|kind| PurchasedItem::new(kind, self.item_id))
    }

    #[must_use]
    pub fn game_details(&self) -> Option<GameDetails> {
        self.game_details
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
