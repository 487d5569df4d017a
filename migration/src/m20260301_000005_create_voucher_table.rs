use sea_orm_migration::prelude::*;

/// Creates the `voucher` table for prepaid platform codes.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Voucher {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Image,
    Price,
    Platform,
    IsActive,
    Stock,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Voucher::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Voucher::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Voucher::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Voucher::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Voucher::Description).text().null())
                    .col(ColumnDef::new(Voucher::Image).string_len(500).null())
                    .col(
                        ColumnDef::new(Voucher::Price)
                            .decimal_len(10, 2)
                            .not_null()
                            .check(Expr::col(Voucher::Price).gte(0)),
                    )
                    .col(ColumnDef::new(Voucher::Platform).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Voucher::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Voucher::Stock)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Voucher::Stock).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Voucher::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Voucher::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Voucher::Table).to_owned())
            .await
    }
}
