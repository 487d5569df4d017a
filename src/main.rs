use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, Request, header};
use axum::response::Response;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use topup_store::config::{Config, Environment};
use topup_store::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        payment_success_threshold = config.payment_success_threshold,
        "Starting Top-up Store API"
    );

    tracing::info!("Connecting to database...");
    let db = topup_store::db::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    // Schema plus the demo catalog
    tracing::info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    tracing::info!("Migrations applied");

    let state = AppState::new(db, config.clone());
    let app = build_app(state, &config);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full application router with all middleware layers.
fn build_app(state: AppState, config: &Config) -> Router {
    let cors = if config.environment == Environment::Production {
        let origin = config
            .frontend_url
            .parse::<HeaderValue>()
            .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173"));

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::permissive()
    };

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                status_code = tracing::field::Empty,
            )
        })
        .on_response(|response: &Response, latency: Duration, span: &Span| {
            span.record("status_code", response.status().as_u16());
            tracing::info!(latency_ms = latency.as_millis(), "response");
        });

    topup_store::routes::router()
        .with_state(state)
        .layer(cors)
        .layer(trace)
}

/// Initialize the `tracing` subscriber with an environment-based filter.
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("topup_store={log_level},tower_http=info,sea_orm=warn").into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
