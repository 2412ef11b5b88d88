use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, SessionClaims};
use crate::features::users::models::Profile;

/// Issues and verifies JWT session tokens (HS256).
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_secs: config.token_ttl.as_secs() as i64,
        }
    }

    /// Issue a session token for a verified account
    pub fn issue(&self, profile: &Profile) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: profile.id.to_string(),
            email: profile.email.clone(),
            role: profile.role.clone(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a session token and resolve the identity it carries
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("Invalid session token: {}", e)))?;

        let account_id = data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid session subject".to_string()))?;

        Ok(AuthenticatedUser {
            account_id,
            email: data.claims.email,
            role: data.claims.role,
        })
    }

    /// Token lifetime in seconds, reported to clients at login
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }
}
