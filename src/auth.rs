/// JWT token helpers
///
/// HS256 bearer tokens carrying the caller's user id in `sub`. The session
/// provider itself (signup, login) is out of scope; this module only mints
/// and validates the tokens the middleware consumes.
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Claims carried in every bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's id
    pub sub: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Mint a token for a user
pub fn generate_token(secret: &str, user_id: Uuid, ttl_secs: u64) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_secs as i64,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {}", e)))
}

/// Validate a token and return its claims
pub fn validate_token(secret: &str, token: &str) -> Result<TokenData<Claims>, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))
}

/// Extract the user id from a validated token
pub fn user_id_from_token(secret: &str, token: &str) -> Result<Uuid, AppError> {
    let data = validate_token(secret, token)?;
    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthorized("invalid subject in token".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = generate_token(SECRET, user_id, 3600).unwrap();
        let parsed = user_id_from_token(SECRET, &token).unwrap();
        assert_eq!(parsed, user_id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_token(SECRET, Uuid::new_v4(), 3600).unwrap();
        assert!(user_id_from_token("other-secret", &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(SECRET, &token).is_err());
    }
}
