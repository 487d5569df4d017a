#![allow(clippy::expect_used)]

mod common;

use axum::http::StatusCode;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::Value;
use uuid::Uuid;

use topup_store::entities::{game, game_category, game_package, voucher};

/// Seeded "Top Up Game" category, parent of every seeded game.
const TOP_UP_CATEGORY: &str = "10000000-0000-4000-8000-000000000001";

fn array(value: &Value) -> Vec<Value> {
    value.as_array().cloned().unwrap_or_default()
}

// ──────────────────────────────────────────────────────────────────────────────
// Games
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_games_returns_page_and_categories() {
    let app = common::test_app().await;
    let (status, body) = common::get(&app.router, "/games").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"]["total"], 5);
    assert_eq!(body["games"]["page"], 1);
    assert_eq!(body["games"]["per_page"], 12);
    assert_eq!(body["games"]["total_pages"], 1);
    assert_eq!(array(&body["games"]["data"]).len(), 5);
    assert_eq!(array(&body["categories"]).len(), 3);
}

#[tokio::test]
async fn list_games_paginates() {
    let app = common::test_app().await;
    let (status, body) = common::get(&app.router, "/games?page=3&per_page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"]["total"], 5);
    assert_eq!(body["games"]["total_pages"], 3);
    assert_eq!(array(&body["games"]["data"]).len(), 1);
}

#[tokio::test]
async fn game_packages_are_active_and_sorted() {
    let app = common::test_app().await;
    let uri = format!("/games/{}", common::MOBILE_LEGENDS);
    let (status, body) = common::get(&app.router, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mobile Legends");
    assert_eq!(body["category"]["slug"], "top-up-game");
    assert_eq!(body["server_options"][0], "Global");

    let packages = array(&body["packages"]);
    assert_eq!(packages.len(), 6);
    let orders: Vec<i64> = packages
        .iter()
        .filter_map(|p| p["sort_order"].as_i64())
        .collect();
    assert!(orders.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(packages[0]["name"], "86 Diamonds");
    assert_eq!(packages[0]["amount"], 86);
    assert_eq!(packages[0]["unit"], "Diamonds");
    assert_eq!(packages[0]["price"], "15000.00");
}

#[tokio::test]
async fn inactive_game_is_hidden_from_listing_but_viewable() {
    let app = common::test_app().await;
    common::deactivate_game(&app.db, common::MOBILE_LEGENDS).await;

    let (_, body) = common::get(&app.router, "/games").await;
    assert_eq!(body["games"]["total"], 4);

    let uri = format!("/games/{}", common::MOBILE_LEGENDS);
    let (status, body) = common::get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
async fn unknown_game_is_not_found() {
    let app = common::test_app().await;
    let uri = format!("/games/{}", uuid::Uuid::new_v4());
    let (status, body) = common::get(&app.router, &uri).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// ──────────────────────────────────────────────────────────────────────────────
// Vouchers
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_vouchers_returns_sorted_platforms() {
    let app = common::test_app().await;
    let (status, body) = common::get(&app.router, "/vouchers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vouchers"]["total"], 12);
    assert_eq!(body["vouchers"]["per_page"], 12);
    assert_eq!(
        body["platforms"],
        serde_json::json!(["Google Play", "PlayStation", "Steam", "iTunes"])
    );
}

#[tokio::test]
async fn list_vouchers_filters_by_platform() {
    let app = common::test_app().await;
    let (status, body) = common::get(&app.router, "/vouchers?platform=Steam").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vouchers"]["total"], 4);
    assert!(
        array(&body["vouchers"]["data"])
            .iter()
            .all(|v| v["platform"] == "Steam")
    );
    // Platform list is not narrowed by the filter
    assert_eq!(array(&body["platforms"]).len(), 4);
}

#[tokio::test]
async fn sold_out_voucher_is_hidden_from_listing_but_viewable() {
    let app = common::test_app().await;
    common::set_voucher_stock(&app.db, common::STEAM_10K, 0).await;

    let (_, body) = common::get(&app.router, "/vouchers").await;
    assert_eq!(body["vouchers"]["total"], 11);

    let uri = format!("/vouchers/{}", common::STEAM_10K);
    let (status, body) = common::get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 0);
    assert_eq!(body["price"], "12000.00");
}

#[tokio::test]
async fn unknown_voucher_is_not_found() {
    let app = common::test_app().await;
    let uri = format!("/vouchers/{}", uuid::Uuid::new_v4());
    let (status, _) = common::get(&app.router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ──────────────────────────────────────────────────────────────────────────────
// Catalog integrity
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn negative_package_price_is_rejected() {
    let app = common::test_app().await;
    let now = chrono::Utc::now().fixed_offset();

    let result = game_package::ActiveModel {
        id: Set(Uuid::new_v4()),
        game_id: Set(Uuid::parse_str(common::MOBILE_LEGENDS).expect("game uuid")),
        name: Set("Broken Pack".to_string()),
        amount: Set(1),
        unit: Set("Diamonds".to_string()),
        price: Set(Decimal::new(-500, 2)),
        is_active: Set(true),
        sort_order: Set(99),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&app.db)
    .await;

    assert!(result.is_err());

    let uri = format!("/games/{}", common::MOBILE_LEGENDS);
    let (_, body) = common::get(&app.router, &uri).await;
    assert!(
        array(&body["packages"])
            .iter()
            .all(|p| p["name"] != "Broken Pack")
    );
}

#[tokio::test]
async fn negative_voucher_price_is_rejected() {
    let app = common::test_app().await;
    let id = common::STEAM_10K;

    let result = voucher::Entity::update_many()
        .col_expr(
            voucher::Column::Price,
            sea_orm::sea_query::Expr::value(Decimal::new(-1, 0)),
        )
        .filter(voucher::Column::Id.eq(Uuid::parse_str(id).expect("voucher uuid")))
        .exec(&app.db)
        .await;

    assert!(result.is_err());

    let (_, body) = common::get(&app.router, &format!("/vouchers/{id}")).await;
    assert_eq!(body["price"], "12000.00");
}

#[tokio::test]
async fn deleting_game_removes_its_packages() {
    let app = common::test_app().await;
    let game_id = Uuid::parse_str(common::MOBILE_LEGENDS).expect("game uuid");

    let total_before = game_package::Entity::find()
        .count(&app.db)
        .await
        .expect("count packages");
    let owned = game_package::Entity::find()
        .filter(game_package::Column::GameId.eq(game_id))
        .count(&app.db)
        .await
        .expect("count packages");
    assert!(owned > 0);

    game::Entity::delete_by_id(game_id)
        .exec(&app.db)
        .await
        .expect("delete game");

    let owned_after = game_package::Entity::find()
        .filter(game_package::Column::GameId.eq(game_id))
        .count(&app.db)
        .await
        .expect("count packages");
    let total_after = game_package::Entity::find()
        .count(&app.db)
        .await
        .expect("count packages");
    assert_eq!(owned_after, 0);
    assert_eq!(total_after, total_before - owned);
}

#[tokio::test]
async fn deleting_category_removes_its_games_and_packages() {
    let app = common::test_app().await;
    let category_id = Uuid::parse_str(TOP_UP_CATEGORY).expect("category uuid");

    game_category::Entity::delete_by_id(category_id)
        .exec(&app.db)
        .await
        .expect("delete category");

    let games = game::Entity::find().count(&app.db).await.expect("count games");
    let packages = game_package::Entity::find()
        .count(&app.db)
        .await
        .expect("count packages");
    assert_eq!(games, 0);
    assert_eq!(packages, 0);

    let (status, body) = common::get(&app.router, "/games").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"]["total"], 0);
    // Vouchers do not belong to a category
    let (_, body) = common::get(&app.router, "/vouchers").await;
    assert_eq!(body["vouchers"]["total"], 12);
}

#[tokio::test]
async fn rolling_back_seed_keeps_rows_added_later() {
    let app = common::test_app().await;
    let own_voucher = common::insert_voucher(&app.db, 5, 20_000).await;

    Migrator::down(&app.db, Some(1)).await.expect("roll back seed");

    let vouchers = voucher::Entity::find().all(&app.db).await.expect("load vouchers");
    assert_eq!(vouchers.len(), 1);
    assert_eq!(vouchers[0].id, own_voucher);
    assert_eq!(game::Entity::find().count(&app.db).await.expect("count games"), 0);
    assert_eq!(
        game_category::Entity::find()
            .count(&app.db)
            .await
            .expect("count categories"),
        0
    );

    Migrator::up(&app.db, None).await.expect("reseed");
    assert_eq!(game::Entity::find().count(&app.db).await.expect("count games"), 5);
    assert_eq!(
        voucher::Entity::find().count(&app.db).await.expect("count vouchers"),
        13
    );
}
