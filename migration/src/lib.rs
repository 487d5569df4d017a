pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_game_category_table;
mod m20260301_000003_create_game_table;
mod m20260301_000004_create_game_package_table;
mod m20260301_000005_create_voucher_table;
mod m20260301_000006_create_transaction_table;
mod m20260302_000001_seed_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_game_category_table::Migration),
            Box::new(m20260301_000003_create_game_table::Migration),
            Box::new(m20260301_000004_create_game_package_table::Migration),
            Box::new(m20260301_000005_create_voucher_table::Migration),
            Box::new(m20260301_000006_create_transaction_table::Migration),
            Box::new(m20260302_000001_seed_catalog::Migration),
        ]
    }
}
