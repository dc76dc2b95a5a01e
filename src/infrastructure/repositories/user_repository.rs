//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Group names are aggregated from `user_groups` into the domain `User`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Page, User, UserRepository};
use crate::infrastructure::database::{is_foreign_key_violation, is_unique_violation};
use crate::shared::error::AppError;

const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

/// Database row for a user joined with its aggregated groups.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    groups: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            groups: self.groups.into_iter().collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// SELECT over users with group aggregation; `filter` is appended verbatim.
fn select_users(filter: &str) -> String {
    format!(
        r#"
        SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.updated_at,
               COALESCE(
                   ARRAY_AGG(g.group_name ORDER BY g.group_name)
                       FILTER (WHERE g.group_name IS NOT NULL),
                   '{{}}'::TEXT[]
               ) AS groups
        FROM users u
        LEFT JOIN user_groups g ON g.user_id = u.id
        {filter}
        "#
    )
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::field("username", DUPLICATE_USERNAME)
    } else {
        AppError::Database(e)
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&select_users("WHERE u.id = $1 GROUP BY u.id"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row =
            sqlx::query_as::<_, UserRow>(&select_users("WHERE u.username = $1 GROUP BY u.id"))
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&select_users(
            "GROUP BY u.id ORDER BY u.id LIMIT $1 OFFSET $2",
        ))
        .bind(page.sql_limit())
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        for group in &user.groups {
            sqlx::query("INSERT INTO user_groups (user_id, group_name) VALUES ($1, $2)")
                .bind(user.id)
                .bind(group)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(User {
            created_at,
            updated_at,
            ..user.clone()
        })
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                password_hash = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found.".into()));
        }

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found.".into()));
        }

        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn add_to_group(&self, user_id: i64, group: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_groups (user_id, group_name)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(group)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::NotFound("User not found.".into())
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn remove_from_group(&self, user_id: i64, group: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_groups WHERE user_id = $1 AND group_name = $2")
            .bind(user_id)
            .bind(group)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
