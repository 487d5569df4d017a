use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub publisher: Option<String>,
    pub is_popular: bool,
    pub is_active: bool,
    /// Ordered list of server names, stored as a JSON array.
    pub server_options: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Server names in display order. Non-string entries are skipped.
    #[must_use]
    pub fn servers(&self) -> Vec<String> {
        self.server_options
            .as_ref()
            .and_then(Json::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_category::Entity",
        from = "Column::CategoryId",
        to = "super::game_category::Column::Id",
        on_delete = "Cascade"
    )]
    Category,
    #[sea_orm(has_many = "super::game_package::Entity")]
    Packages,
}

impl Related<super::game_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::game_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
