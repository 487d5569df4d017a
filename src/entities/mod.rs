pub mod game;
pub mod game_category;
pub mod game_package;
pub mod payment_method;
pub mod transaction;
pub mod transaction_kind;
pub mod transaction_status;
pub mod user;
pub mod voucher;

pub use payment_method::PaymentMethod;
pub use transaction_kind::{PurchasedItem, TransactionKind};
pub use transaction_status::TransactionStatus;
