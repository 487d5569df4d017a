mod auth;
mod games;
mod health;
mod home;
mod transactions;
mod vouchers;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health-check`: liveness probe
/// - `GET /`, `/home`: storefront landing summary
/// - `/games/...`, `/vouchers/...`: catalog, plus buy shortcuts
/// - `/transactions/...`: the signed-in user's ledger and checkout
/// - `/auth/...`: sign-up, sign-in, current user
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(home::router())
        .nest("/games", games::router())
        .nest("/vouchers", vouchers::router())
        .nest("/transactions", transactions::router())
        .nest("/auth", auth::router())
}
