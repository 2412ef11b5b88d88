use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::RegisterRequestDto;
use crate::features::auth::services::TokenService;
use crate::features::users::models::Profile;
use crate::shared::constants::ROLE_USER;
use crate::shared::validation::is_valid_password;

/// Service for account creation and credential verification
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Register a new account and create its profile.
    ///
    /// The registration path always assigns the "user" role; elevation to
    /// admin happens out-of-band.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<Profile> {
        if !is_valid_password(&dto.password) {
            return Err(AppError::Validation(
                "Password must be 8-20 characters and contain uppercase, lowercase, \
                 digit and special characters"
                    .to_string(),
            ));
        }

        let password_hash = hash_password(&dto.password)?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles
                (email, fullname, employee_number, workshop, zone, phone, role, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&dto.email)
        .bind(&dto.fullname)
        .bind(&dto.employee_number)
        .bind(&dto.workshop)
        .bind(&dto.zone)
        .bind(&dto.phone)
        .bind(ROLE_USER)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("An account with this email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        info!("Account registered: id={}, email={}", profile.id, profile.email);

        Ok(profile)
    }

    /// Verify credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<(Profile, String)> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(password, &profile.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.tokens.issue(&profile)?;

        info!("Login succeeded: id={}, role={}", profile.id, profile.role);

        Ok((profile, token))
    }

    /// Token lifetime in seconds, for login responses
    pub fn token_ttl_secs(&self) -> i64 {
        self.tokens.token_ttl_secs()
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("Sup3r-Secret!").unwrap();
        assert!(verify_password("Sup3r-Secret!", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
