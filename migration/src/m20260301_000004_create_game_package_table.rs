use sea_orm_migration::prelude::*;

/// Creates the `game_package` table. Deleting a game cascades to its packages.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GamePackage {
    Table,
    Id,
    GameId,
    Name,
    Amount,
    Unit,
    Price,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GamePackage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamePackage::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GamePackage::GameId).uuid().not_null())
                    .col(ColumnDef::new(GamePackage::Name).string_len(255).not_null())
                    .col(ColumnDef::new(GamePackage::Amount).integer().not_null())
                    .col(ColumnDef::new(GamePackage::Unit).string_len(100).not_null())
                    .col(
                        ColumnDef::new(GamePackage::Price)
                            .decimal_len(10, 2)
                            .not_null()
                            .check(Expr::col(GamePackage::Price).gte(0)),
                    )
                    .col(
                        ColumnDef::new(GamePackage::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GamePackage::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GamePackage::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamePackage::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_package_game_id")
                            .from(GamePackage::Table, GamePackage::GameId)
                            .to(Game::Table, Game::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_package_game_id")
                    .table(GamePackage::Table)
                    .col(GamePackage::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_package_active_sort")
                    .table(GamePackage::Table)
                    .col(GamePackage::IsActive)
                    .col(GamePackage::SortOrder)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamePackage::Table).to_owned())
            .await
    }
}
