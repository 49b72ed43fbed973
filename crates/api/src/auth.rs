//! JWT validation for the caller-identity extractor.
//!
//! The platform's login flow lives outside this repository; handlers only
//! see an already-issued Bearer token carrying the caller's account id
//! and role.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use pitchside_core::types::DbId;

/// JWT configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret (`JWT_SECRET`).
    pub secret: String,
}

impl JwtConfig {
    /// Load from environment variables. The default secret is only
    /// suitable for local development.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        Self { secret }
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The caller's account id.
    pub sub: DbId,
    /// The caller's role name.
    pub role: String,
    /// Expiry, as a Unix timestamp.
    pub exp: i64,
}

/// Validate a token and return its claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Issue a token for the given account. Used by operational tooling and
/// tests; the production login flow issues its own.
pub fn issue_token(
    user_id: DbId,
    role: &str,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
        }
    }

    #[test]
    fn issued_tokens_validate() {
        let token = issue_token(42, "player", 3600, &config()).unwrap();
        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "player");
    }

    #[test]
    fn expired_tokens_are_rejected() {
        // Well past the validator's default leeway.
        let token = issue_token(42, "player", -600, &config()).unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let other = JwtConfig {
            secret: "other-secret".into(),
        };
        let token = issue_token(42, "player", 3600, &other).unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }
}
