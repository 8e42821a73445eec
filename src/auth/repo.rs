use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    #[serde(skip_serializing)]
    pub passcode_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_name(db: &PgPool, user_name: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, passcode_hash, created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, user_id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, passcode_hash, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed passcode.
    pub async fn create(db: &PgPool, user_name: &str, passcode_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, passcode_hash)
            VALUES ($1, $2)
            RETURNING user_id, user_name, passcode_hash, created_at
            "#,
        )
        .bind(user_name)
        .bind(passcode_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
