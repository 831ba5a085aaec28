use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, username, name, password_hash, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let id: Uuid = row.try_get("id").map_err(database_error)?;
        let username: String = row.try_get("username").map_err(database_error)?;
        let name: String = row.try_get("name").map_err(database_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(database_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;

        Ok(User {
            id: UserId(id),
            username: Username::new(username)?,
            name: DisplayName::new(name)?,
            password_hash,
            created_at,
        })
    }

    fn map_insert_error(e: sqlx::Error, username: &Username) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("users_username_key") {
                return UserError::UsernameAlreadyExists(username.as_str().to_string());
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Run a storage operation under `deadline`; dropping it on expiry cancels
/// the in-flight query.
async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, UserError>
where
    F: Future<Output = Result<T, UserError>> + Send,
{
    tokio::time::timeout(deadline, operation)
        .await
        .map_err(|_| {
            tracing::error!(
                timeout_ms = deadline.as_millis(),
                "Database operation timed out"
            );
            UserError::DatabaseTimeout(deadline.as_millis())
        })?
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        with_deadline(self.query_timeout, async {
            let mut tx = self.pool.begin().await.map_err(database_error)?;

            let id: Uuid = sqlx::query(
                r#"
                INSERT INTO users (username, name, password_hash)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(user.username.as_str())
            .bind(user.name.as_str())
            .bind(&user.password_hash)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| Self::map_insert_error(e, &user.username))?
            .try_get("id")
            .map_err(database_error)?;

            // Read back inside the transaction so server-assigned fields are
            // those of this insert.
            let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(database_error)?;
            let created = Self::row_to_user(&row)?;

            tx.commit().await.map_err(database_error)?;

            Ok(created)
        })
        .await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        with_deadline(self.query_timeout, async {
            let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error)?;

            row.as_ref().map(Self::row_to_user).transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        with_deadline(self.query_timeout, async {
            let row =
                sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
                    .bind(username.as_str())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(database_error)?;

            row.as_ref().map(Self::row_to_user).transpose()
        })
        .await
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<User, UserError> {
        with_deadline(self.query_timeout, async {
            let row = sqlx::query(&format!(
                "UPDATE users SET password_hash = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
            ))
            .bind(id.0)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

            match row {
                Some(row) => Self::row_to_user(&row),
                None => Err(UserError::NotFound(id.to_string())),
            }
        })
        .await
    }
}
