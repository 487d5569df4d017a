use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

use crate::error::FieldErrors;

/// Hash a password using `Argon2id`.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify a password against an `Argon2id` hash.
///
/// # Errors
///
/// Returns an error if the stored hash is not a valid PHC string.
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password rules: 8 to 128 characters.
///
/// # Errors
///
/// Returns a user-facing message when the password is rejected.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters.".to_string());
    }
    if password.len() > 128 {
        return Err("Password must be at most 128 characters.".to_string());
    }
    Ok(())
}

/// Basic email shape check: one `@`, non-empty local part, dotted domain.
///
/// # Errors
///
/// Returns a user-facing message when the email is rejected.
pub fn validate_email(email: &str) -> Result<(), String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("Email is required.".to_string());
    }
    match trimmed.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err("Invalid email format.".to_string()),
    }
}

/// Username rules: 3-50 letters, digits and underscores.
///
/// # Errors
///
/// Returns a user-facing message when the username is rejected.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters.".to_string());
    }
    if username.len() > 50 {
        return Err("Username must be at most 50 characters.".to_string());
    }
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err("Username may only contain letters, numbers, and underscores.".to_string());
    }
    Ok(())
}

/// Run every sign-up rule and collect the failures per field.
#[must_use]
pub fn validate_signup(email: &str, username: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_email(email) {
        errors.insert("email", msg);
    }
    if let Err(msg) = validate_username(username) {
        errors.insert("username", msg);
    }
    if let Err(msg) = validate_password(password) {
        errors.insert("password", msg);
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct-horse").unwrap_or_default();
        assert!(verify_password("correct-horse", &hash).unwrap_or(false));
        assert!(!verify_password("wrong-horse", &hash).unwrap_or(true));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("buyer@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("buyer").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("buyer@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_validate_signup_collects_all_fields() {
        let errors = validate_signup("nope", "a!", "short");
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("username"));
        assert!(errors.contains_key("password"));

        assert!(validate_signup("buyer@example.com", "buyer_1", "long-enough").is_empty());
    }
}
