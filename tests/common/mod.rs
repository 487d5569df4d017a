#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use topup_store::config::{Config, Environment};
use topup_store::entities::{PaymentMethod, game, transaction, voucher};
use topup_store::services::payment::{PaymentGateway, PaymentOutcome, SimulatedGateway};
use topup_store::state::AppState;

/// Seeded "Mobile Legends" game and its first package (86 Diamonds, 15000.00).
pub const MOBILE_LEGENDS: &str = "20000000-0000-4000-8000-000000000001";
pub const ML_86_DIAMONDS: &str = "30000000-0000-4000-8000-000000000001";
/// Seeded "Call of Duty Mobile", the only game not flagged popular.
pub const COD_MOBILE: &str = "20000000-0000-4000-8000-000000000005";
/// Seeded "Steam Wallet IDR 10,000" voucher (12000.00, stock 250).
pub const STEAM_10K: &str = "40000000-0000-4000-8000-000000000001";

/// Gateway with a fixed answer.
#[derive(Debug)]
pub struct FixedGateway {
    pub approve: bool,
}

#[async_trait]
impl PaymentGateway for FixedGateway {
    async fn charge(&self, _amount: Decimal, _method: PaymentMethod) -> PaymentOutcome {
        if self.approve {
            PaymentOutcome::Approved {
                gateway_reference: "PAY-TEST00000001".to_string(),
            }
        } else {
            PaymentOutcome::Declined
        }
    }
}

/// Always-approving gateway that records how many charges it collected.
#[derive(Debug, Default)]
pub struct CountingGateway {
    pub charges: AtomicUsize,
}

#[async_trait]
impl PaymentGateway for CountingGateway {
    async fn charge(&self, _amount: Decimal, _method: PaymentMethod) -> PaymentOutcome {
        self.charges.fetch_add(1, Ordering::SeqCst);
        // Keep the charge in flight long enough for a competing request to arrive
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        PaymentOutcome::Approved {
            gateway_reference: "PAY-TEST00000002".to_string(),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        jwt_secret: "test-secret-key-for-testing-only-32chars".to_string(),
        jwt_access_expiration_secs: 900,
        frontend_url: "http://localhost:5173".to_string(),
        payment_success_threshold: 3,
    }
}

/// Fresh in-memory database, migrated and seeded, behind the full router.
pub async fn test_app_with_gateway(gateway: Arc<dyn PaymentGateway>) -> TestApp {
    let config = test_config();
    let db = topup_store::db::connect(&config.database_url)
        .await
        .expect("connect to in-memory database");
    Migrator::up(&db, None).await.expect("run migrations");

    let state = AppState {
        db: db.clone(),
        config,
        payment_gateway: gateway,
    };

    TestApp {
        router: topup_store::routes::router().with_state(state),
        db,
    }
}

pub async fn test_app() -> TestApp {
    test_app_with_gateway(Arc::new(SimulatedGateway::default())).await
}

/// Send a request and return (status, parsed JSON body or `Null`).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(token), None).await
}

pub async fn patch_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, "PATCH", uri, Some(token), None).await
}

/// Return the raw status and `Location` header, for redirect checks.
pub async fn get_location(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    (response.status(), location)
}

/// Sign up a user and return its access token.
pub async fn signup(app: &Router, username: &str) -> String {
    let (status, body) = post_json(
        app,
        "/auth/signup",
        &json!({
            "email": format!("{username}@example.com"),
            "username": username,
            "password": "password123",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body["token"].as_str().unwrap_or_default().to_string()
}

/// Buy one unit of `voucher_id` with QRIS.
pub async fn buy_voucher(app: &Router, token: &str, voucher_id: &str) -> (StatusCode, Value) {
    post_json_auth(
        app,
        "/transactions",
        token,
        &json!({
            "type": "voucher",
            "voucher_id": voucher_id,
            "payment_method": "qris",
        }),
    )
    .await
}

/// Top up the seeded Mobile Legends 86 Diamonds package.
pub async fn topup_mobile_legends(app: &Router, token: &str) -> (StatusCode, Value) {
    post_json_auth(
        app,
        "/transactions",
        token,
        &json!({
            "type": "game_topup",
            "game_id": MOBILE_LEGENDS,
            "package_id": ML_86_DIAMONDS,
            "user_id": "12345678",
            "server": "Global",
            "payment_method": "bank_transfer",
        }),
    )
    .await
}

/// Insert an active voucher with the given stock and whole-number price.
pub async fn insert_voucher(db: &DatabaseConnection, stock: i32, price: i64) -> Uuid {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now().fixed_offset();
    voucher::ActiveModel {
        id: Set(id),
        name: Set(format!("Test Voucher {id}")),
        slug: Set(format!("test-voucher-{id}")),
        description: Set(None),
        image: Set(None),
        price: Set(Decimal::new(price, 0)),
        platform: Set("Steam".to_string()),
        is_active: Set(true),
        stock: Set(stock),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert voucher");
    id
}

pub async fn voucher_stock(db: &DatabaseConnection, id: &str) -> i32 {
    let id = Uuid::parse_str(id).expect("voucher uuid");
    voucher::Entity::find_by_id(id)
        .one(db)
        .await
        .expect("load voucher")
        .map(|v| v.stock)
        .unwrap_or(-1)
}

pub async fn set_voucher_stock(db: &DatabaseConnection, id: &str, stock: i32) {
    let id = Uuid::parse_str(id).expect("voucher uuid");
    voucher::Entity::update_many()
        .col_expr(voucher::Column::Stock, Expr::value(stock))
        .filter(voucher::Column::Id.eq(id))
        .exec(db)
        .await
        .expect("update stock");
}

pub async fn deactivate_game(db: &DatabaseConnection, id: &str) {
    let id = Uuid::parse_str(id).expect("game uuid");
    game::Entity::update_many()
        .col_expr(game::Column::IsActive, Expr::value(false))
        .filter(game::Column::Id.eq(id))
        .exec(db)
        .await
        .expect("deactivate game");
}

/// Ledger rows recorded against `item_id`.
pub async fn transactions_for_item(db: &DatabaseConnection, item_id: &str) -> usize {
    let id = Uuid::parse_str(item_id).expect("item uuid");
    transaction::Entity::find()
        .filter(transaction::Column::ItemId.eq(id))
        .all(db)
        .await
        .expect("load transactions")
        .len()
}

/// `TXN-` followed by 10 uppercase alphanumerics.
pub fn is_transaction_code(code: &str) -> bool {
    code.strip_prefix("TXN-").is_some_and(|suffix| {
        suffix.len() == 10
            && suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    })
}

pub fn str_field<'a>(value: &'a Value, field: &str) -> &'a str {
    value[field].as_str().unwrap_or_default()
}
