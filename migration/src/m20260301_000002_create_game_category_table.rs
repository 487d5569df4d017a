use sea_orm_migration::prelude::*;

/// Creates the `game_category` table grouping games on the storefront.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum GameCategory {
    Table,
    Id,
    Name,
    Slug,
    Icon,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameCategory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameCategory::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(GameCategory::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GameCategory::Icon).string_len(50).null())
                    .col(ColumnDef::new(GameCategory::Description).text().null())
                    .col(
                        ColumnDef::new(GameCategory::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GameCategory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameCategory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameCategory::Table).to_owned())
            .await
    }
}
