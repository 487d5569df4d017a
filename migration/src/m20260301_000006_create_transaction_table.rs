use sea_orm_migration::prelude::*;

/// Creates the `transaction` ledger.
///
/// The purchased item is stored as a `kind` discriminant plus `item_id`
/// rather than a foreign key, since it points at either `game` or `voucher`.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Transaction {
    Table,
    Id,
    TransactionId,
    UserId,
    Kind,
    ItemId,
    ItemName,
    Amount,
    Status,
    PaymentMethod,
    PaymentGatewayId,
    PaymentDetails,
    GameDetails,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transaction::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transaction::TransactionId)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Transaction::UserId).uuid().not_null())
                    .col(ColumnDef::new(Transaction::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Transaction::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(Transaction::ItemName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Transaction::PaymentMethod)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::PaymentGatewayId)
                            .string_len(20)
                            .null(),
                    )
                    .col(ColumnDef::new(Transaction::PaymentDetails).json().null())
                    .col(ColumnDef::new(Transaction::GameDetails).json().null())
                    .col(
                        ColumnDef::new(Transaction::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transaction::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_user_id")
                            .from(Transaction::Table, Transaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_user_status")
                    .table(Transaction::Table)
                    .col(Transaction::UserId)
                    .col(Transaction::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_status_created")
                    .table(Transaction::Table)
                    .col(Transaction::Status)
                    .col(Transaction::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await
    }
}
