use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;

/// JWT claims carried by storefront access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID as a UUID string.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued-at time (Unix timestamp).
    pub iat: i64,
}

/// Issue a signed HS256 access token for `user_id`.
///
/// # Errors
///
/// Returns an error if the configured lifetime overflows the expiry timestamp
/// or JWT encoding fails.
pub fn issue_access_token(user_id: Uuid, config: &Config) -> anyhow::Result<String> {
    let now = Utc::now().timestamp();

    let exp = i64::try_from(config.jwt_access_expiration_secs)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Access token lifetime of {}s is out of range",
                config.jwt_access_expiration_secs
            )
        })?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
        .map_err(|e| anyhow::anyhow!("Failed to encode access token: {e}"))
}

/// Validate an access token and return the user id it was issued for.
///
/// # Errors
///
/// Returns an error if the token is malformed, expired, signed with another
/// secret, or its subject is not a UUID.
pub fn validate_access_token(token: &str, secret: &str) -> anyhow::Result<Uuid> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let token_data = decode::<Claims>(token, &key, &Validation::default())
        .map_err(|e| anyhow::anyhow!("Invalid access token: {e}"))?;

    token_data
        .claims
        .sub
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid token subject: {e}"))
}
