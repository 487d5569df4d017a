use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a ledger transaction.
///
/// A transaction starts `Pending` and is resolved exactly once to `Success`
/// or `Failed` by payment processing. `Cancelled` is a valid stored value but
/// no operation currently produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Created, awaiting payment
    #[default]
    Pending,
    /// Payment approved
    Success,
    /// Payment declined
    Failed,
    /// Reserved; never set by the current flow
    Cancelled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransactionStatus {
    /// Convert from database string representation
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Check if payment can still be processed
    pub const fn is_payable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if no further transition is possible
    pub const fn is_terminal(&self) -> bool {
        !self.is_payable()
    }
}
