//! Read-only projections over the catalog tables.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{game, game_category, game_package, voucher};
use crate::error::AppError;
use crate::utils::{Page, PageParams};

pub const CATALOG_PAGE_SIZE: u64 = 12;
pub const HOME_POPULAR_GAMES: u64 = 8;
pub const HOME_FEATURED_VOUCHERS: u64 = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Views
// ─────────────────────────────────────────────────────────────────────────────

/// Render a stored price with exactly two decimal places.
#[must_use]
pub fn format_price(price: rust_decimal::Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl From<game_category::Model> for CategoryView {
    fn from(c: game_category::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            icon: c.icon,
            description: c.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackageView {
    pub id: Uuid,
    pub game_id: Uuid,
    pub name: String,
    pub amount: i32,
    pub unit: String,
    pub price: String,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<game_package::Model> for PackageView {
    fn from(p: game_package::Model) -> Self {
        Self {
            id: p.id,
            game_id: p.game_id,
            name: p.name,
            amount: p.amount,
            unit: p.unit,
            price: format_price(p.price),
            is_active: p.is_active,
            sort_order: p.sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub publisher: Option<String>,
    pub is_popular: bool,
    pub is_active: bool,
    pub server_options: Vec<String>,
    pub category: Option<CategoryView>,
    /// Active packages only, by `sort_order` ascending.
    pub packages: Vec<PackageView>,
}

impl GameView {
    fn new(
        game: game::Model,
        category: Option<CategoryView>,
        packages: Vec<PackageView>,
    ) -> Self {
        let server_options = game.servers();
        Self {
            id: game.id,
            name: game.name,
            slug: game.slug,
            description: game.description,
            image: game.image,
            publisher: game.publisher,
            is_popular: game.is_popular,
            is_active: game.is_active,
            server_options,
            category,
            packages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoucherView {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: String,
    pub platform: String,
    pub is_active: bool,
    pub stock: i32,
}

impl From<voucher::Model> for VoucherView {
    fn from(v: voucher::Model) -> Self {
        Self {
            id: v.id,
            name: v.name,
            slug: v.slug,
            description: v.description,
            image: v.image,
            price: format_price(v.price),
            platform: v.platform,
            is_active: v.is_active,
            stock: v.stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeSummary {
    pub categories: Vec<CategoryView>,
    pub popular_games: Vec<GameView>,
    pub featured_vouchers: Vec<VoucherView>,
}

#[derive(Debug, Serialize)]
pub struct GameListing {
    pub games: Page<GameView>,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Serialize)]
pub struct VoucherListing {
    pub vouchers: Page<VoucherView>,
    /// Distinct platforms over all active vouchers, sorted.
    pub platforms: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

/// Attach category and active, ordered packages to each game in one round
/// trip per relation.
pub async fn load_game_views<C: ConnectionTrait>(
    db: &C,
    games: Vec<game::Model>,
) -> Result<Vec<GameView>, AppError> {
    if games.is_empty() {
        return Ok(Vec::new());
    }

    let game_ids: Vec<Uuid> = games.iter().map(|g| g.id).collect();
    let category_ids: Vec<Uuid> = games.iter().map(|g| g.category_id).collect();

    let categories: HashMap<Uuid, game_category::Model> = game_category::Entity::find()
        .filter(game_category::Column::Id.is_in(category_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let mut packages: HashMap<Uuid, Vec<PackageView>> = HashMap::new();
    for package in game_package::Entity::find()
        .filter(game_package::Column::GameId.is_in(game_ids))
        .filter(game_package::Column::IsActive.eq(true))
        .order_by_asc(game_package::Column::SortOrder)
        .all(db)
        .await?
    {
        packages
            .entry(package.game_id)
            .or_default()
            .push(package.into());
    }

    Ok(games
        .into_iter()
        .map(|g| {
            let category = categories.get(&g.category_id).cloned().map(Into::into);
            let pkgs = packages.remove(&g.id).unwrap_or_default();
            GameView::new(g, category, pkgs)
        })
        .collect())
}

pub async fn list_active_categories<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<CategoryView>, AppError> {
    let categories = game_category::Entity::find()
        .filter(game_category::Column::IsActive.eq(true))
        .order_by_asc(game_category::Column::Name)
        .all(db)
        .await?;
    Ok(categories.into_iter().map(Into::into).collect())
}

pub async fn list_active_games<C: ConnectionTrait>(
    db: &C,
    params: PageParams,
) -> Result<GameListing, AppError> {
    let page = params.page();
    let per_page = params.per_page(CATALOG_PAGE_SIZE);

    let query = game::Entity::find().filter(game::Column::IsActive.eq(true));
    let total = query.clone().count(db).await?;
    let games = query
        .order_by_asc(game::Column::Name)
        .offset((page - 1) * per_page)
        .limit(per_page)
        .all(db)
        .await?;

    Ok(GameListing {
        games: Page::new(load_game_views(db, games).await?, page, per_page, total),
        categories: list_active_categories(db).await?,
    })
}

pub async fn list_popular_games<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<GameView>, AppError> {
    let games = game::Entity::find()
        .filter(game::Column::IsActive.eq(true))
        .filter(game::Column::IsPopular.eq(true))
        .order_by_asc(game::Column::Name)
        .limit(limit)
        .all(db)
        .await?;
    load_game_views(db, games).await
}

/// Active vouchers with stock left, optionally narrowed to one platform.
pub async fn list_active_vouchers<C: ConnectionTrait>(
    db: &C,
    params: PageParams,
    platform: Option<&str>,
) -> Result<VoucherListing, AppError> {
    let page = params.page();
    let per_page = params.per_page(CATALOG_PAGE_SIZE);

    let mut query = voucher::Entity::find()
        .filter(voucher::Column::IsActive.eq(true))
        .filter(voucher::Column::Stock.gt(0));
    if let Some(platform) = platform {
        query = query.filter(voucher::Column::Platform.eq(platform));
    }

    let total = query.clone().count(db).await?;
    let vouchers = query
        .order_by_asc(voucher::Column::Name)
        .offset((page - 1) * per_page)
        .limit(per_page)
        .all(db)
        .await?;

    let platforms: Vec<String> = voucher::Entity::find()
        .select_only()
        .column(voucher::Column::Platform)
        .distinct()
        .filter(voucher::Column::IsActive.eq(true))
        .order_by_asc(voucher::Column::Platform)
        .into_tuple()
        .all(db)
        .await?;

    Ok(VoucherListing {
        vouchers: Page::new(
            vouchers.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        ),
        platforms,
    })
}

pub async fn list_featured_vouchers<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<VoucherView>, AppError> {
    let vouchers = voucher::Entity::find()
        .filter(voucher::Column::IsActive.eq(true))
        .filter(voucher::Column::Stock.gt(0))
        .order_by_asc(voucher::Column::Name)
        .limit(limit)
        .all(db)
        .await?;
    Ok(vouchers.into_iter().map(Into::into).collect())
}

pub async fn home_summary<C: ConnectionTrait>(db: &C) -> Result<HomeSummary, AppError> {
    Ok(HomeSummary {
        categories: list_active_categories(db).await?,
        popular_games: list_popular_games(db, HOME_POPULAR_GAMES).await?,
        featured_vouchers: list_featured_vouchers(db, HOME_FEATURED_VOUCHERS).await?,
    })
}

/// Fetch a game by id with its category and active packages. Inactive games
/// are still returned.
pub async fn get_game<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<GameView, AppError> {
    let game = game::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

    load_game_views(db, vec![game])
        .await?
        .pop()
        .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
}

pub async fn get_voucher<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<VoucherView, AppError> {
    voucher::Entity::find_by_id(id)
        .one(db)
        .await?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound("Voucher not found".to_string()))
}
