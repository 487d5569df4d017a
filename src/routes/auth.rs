use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthUser, jwt, password};
use crate::entities::user;
use crate::error::AppError;
use crate::state::AppState;

/// Build the auth route group: `/auth/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me))
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// `POST /auth/signup`: create an account and return an access token.
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = body.email.trim().to_lowercase();
    let username = body.username.trim().to_string();

    let errors = password::validate_signup(&email, &username, &body.password);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let existing_email = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing_email.is_some() {
        return Err(AppError::Conflict("Email already registered.".to_string()));
    }

    let existing_username = user::Entity::find()
        .filter(user::Column::Username.eq(&username))
        .one(&state.db)
        .await?;
    if existing_username.is_some() {
        return Err(AppError::Conflict("Username already taken.".to_string()));
    }

    let password_hash = password::hash_password(&body.password)?;
    let now = Utc::now().fixed_offset();

    let user_model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        username: Set(username),
        password_hash: Set(password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    tracing::info!(user_id = %user_model.id, "User signed up");

    let token = jwt::issue_access_token(user_model.id, &state.config)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user_model.into(),
            token,
        }),
    ))
}

/// `POST /auth/signin`: exchange email and password for an access token.
async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = body.email.trim().to_lowercase();
    let invalid = || AppError::Unauthorized("Invalid email or password.".to_string());

    let user_model = user::Entity::find()
        .filter(user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&body.password, &user_model.password_hash)? {
        return Err(invalid());
    }

    let token = jwt::issue_access_token(user_model.id, &state.config)?;
    Ok(Json(AuthResponse {
        user: user_model.into(),
        token,
    }))
}

/// `GET /auth/me`: the signed-in user.
async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}
