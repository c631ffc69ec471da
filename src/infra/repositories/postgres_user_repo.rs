use crate::domain::{models::user::{NewUser, User}, ports::UserRepository};
use crate::error::AppError;
use crate::infra::repositories::bounded;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        bounded(
            sqlx::query_as::<_, User>(
                r#"INSERT INTO users (first_name, last_name, email, password_hash, access_level, created_at, updated_at)
                   VALUES ($1, $2, $3, $4, $5, $6, $7)
                   RETURNING id, first_name, last_name, email, password_hash, access_level, created_at, updated_at"#
            )
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.access_level)
                .bind(now)
                .bind(now)
                .fetch_one(&self.pool)
        ).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        bounded(
            sqlx::query_as::<_, User>(
                "SELECT id, first_name, last_name, email, password_hash, access_level, created_at, updated_at FROM users WHERE email = $1"
            )
                .bind(email)
                .fetch_optional(&self.pool)
        ).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        bounded(
            sqlx::query_as::<_, User>(
                "SELECT id, first_name, last_name, email, password_hash, access_level, created_at, updated_at FROM users WHERE id = $1"
            )
                .bind(id)
                .fetch_optional(&self.pool)
        ).await
    }
}
