//! User repository and credential verification

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, is_unique_violation},
    models::{NewUser, Role, User},
};

/// Hash a password with argon2
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalServerError
        })
}

/// Verify a password against a stored argon2 hash
pub fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn user_from_row(row: &PgRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: Role::parse(&role).unwrap_or(Role::Admin),
        reset_token: row.get("reset_token"),
        reset_token_expiry: row.get("reset_token_expiry"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, reset_token, \
                            reset_token_expiry, created_at, updated_at";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// Used by operational provisioning; there is no HTTP surface for this.
    pub async fn create(&self, new_user: &NewUser) -> ApiResult<User> {
        info!("Creating new user: {}", new_user.email);

        let password_hash = hash_password(&new_user.password)?;
        let email = new_user.email.trim().to_lowercase();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.name)
        .bind(&email)
        .bind(&password_hash)
        .bind(new_user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::DuplicateEmail
            } else {
                ApiError::from(e)
            }
        })?;

        Ok(user_from_row(&row))
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Authenticate a user by email and password
    ///
    /// An unknown email and a wrong password produce the same error, so
    /// the response never reveals whether the email exists.
    pub async fn authenticate(&self, email: &str, password: &str) -> ApiResult<User> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&user.password_hash, password) {
            return Err(ApiError::InvalidCredentials);
        }

        Ok(user)
    }
}
