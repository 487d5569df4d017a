use sea_orm_migration::prelude::*;

/// Creates the `game` table. Deleting a category cascades to its games.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
    CategoryId,
    Name,
    Slug,
    Description,
    Image,
    Publisher,
    IsPopular,
    IsActive,
    ServerOptions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GameCategory {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Game::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Game::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Game::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Game::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Game::Description).text().null())
                    .col(ColumnDef::new(Game::Image).string_len(500).null())
                    .col(ColumnDef::new(Game::Publisher).string_len(255).null())
                    .col(
                        ColumnDef::new(Game::IsPopular)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Game::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Game::ServerOptions).json().null())
                    .col(
                        ColumnDef::new(Game::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Game::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_category_id")
                            .from(Game::Table, Game::CategoryId)
                            .to(GameCategory::Table, GameCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_active_popular")
                    .table(Game::Table)
                    .col(Game::IsActive)
                    .col(Game::IsPopular)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_game_category_id")
                    .table(Game::Table)
                    .col(Game::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}
