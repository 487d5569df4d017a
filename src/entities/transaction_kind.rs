use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What a transaction purchases. Also the discriminant of [`PurchasedItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// In-game currency credited to a player account
    GameTopup,
    /// Prepaid platform voucher
    Voucher,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransactionKind {
    /// Convert from database / request string representation
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "game_topup" => Some(Self::GameTopup),
            "voucher" => Some(Self::Voucher),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GameTopup => "game_topup",
            Self::Voucher => "voucher",
        }
    }
}

/// Reference to the catalog row a transaction was made against.
///
/// A top-up points at the game, not the package; the package is captured in
/// the transaction's game details instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasedItem {
    Game(Uuid),
    Voucher(Uuid),
}

impl PurchasedItem {
    /// Rebuild from the stored `(kind, item_id)` pair.
    #[must_use]
    pub const fn new(kind: TransactionKind, id: Uuid) -> Self {
        match kind {
            TransactionKind::GameTopup => Self::Game(id),
            TransactionKind::Voucher => Self::Voucher(id),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        match self {
            Self::Game(_) => TransactionKind::GameTopup,
            Self::Voucher(_) => TransactionKind::Voucher,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::Game(id) | Self::Voucher(id) => *id,
        }
    }
}
