pub mod pagination;
pub mod reference_code;

pub use pagination::{Page, PageParams};
pub use reference_code::generate_transaction_id;
