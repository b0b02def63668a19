use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::{connection::begin, DbUser};
use crate::error::{AppError, Result};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[async_trait]
pub trait UserRepositoryTrait {
    /// Stores the password exactly as given and returns the new username.
    async fn register(&self, username: &str, password: &str) -> Result<String>;
    /// Returns the username when the stored password equals `password`.
    async fn authenticate(&self, username: &str, password: &str) -> Result<String>;
    async fn get_by_username(&self, username: &str) -> Result<Option<DbUser>>;
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn register(&self, username: &str, password: &str) -> Result<String> {
        let mut tx = begin(&self.pool).await?;

        // `username` is UNIQUE; the constraint violation is the conflict signal.
        let created = sqlx::query_scalar::<_, String>(
            "INSERT INTO users (username, password) VALUES (?, ?) RETURNING username",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Username already exists".to_string()),
            other => other,
        })?;

        tx.commit().await?;

        info!("Registered user {}", created);
        Ok(created)
    }

    async fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        match self.get_by_username(username).await? {
            Some(user) if user.password == password => {
                info!("User {} logged in", user.username);
                Ok(user.username)
            }
            _ => {
                warn!("Failed login attempt for {}", username);
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<DbUser>> {
        let mut tx = begin(&self.pool).await?;

        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }
}
