use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use sea_orm::EntityTrait;

use crate::auth::jwt;
use crate::entities::user;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in shopper resolved from `Authorization: Bearer <token>`.
///
/// Handlers that take this extractor answer 401 for anonymous callers:
/// ```ignore
/// async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header.".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format.".to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let user_id = jwt::validate_access_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token.".to_string()))?;

        // Deleted accounts fail here even when the signature is valid
        user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("User not found.".to_string()))
    }
}
