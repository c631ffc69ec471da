use crate::domain::{models::room::Room, ports::AvailabilityRepository};
use crate::error::AppError;
use crate::infra::repositories::bounded;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

pub struct PostgresRoomRepo {
    pool: PgPool,
}

impl PostgresRoomRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresRoomRepo {
    async fn is_room_available(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> Result<bool, AppError> {
        let row = bounded(
            sqlx::query("SELECT COUNT(id) AS count FROM room_restriction WHERE $1 < end_date AND $2 > start_date AND room_id = $3")
                .bind(start)
                .bind(end)
                .bind(room_id)
                .fetch_one(&self.pool)
        ).await?;
        Ok(row.get::<i64, _>("count") == 0)
    }

    async fn find_available_rooms(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Room>, AppError> {
        bounded(
            sqlx::query_as::<_, Room>(
                r#"SELECT r.id, r.room_name, r.created_at, r.updated_at
                   FROM room r
                   WHERE r.id NOT IN (
                       SELECT rr.room_id FROM room_restriction rr WHERE $1 < rr.end_date AND $2 > rr.start_date
                   )
                   ORDER BY r.id"#
            )
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
        ).await
    }

    async fn get_room(&self, id: i64) -> Result<Room, AppError> {
        bounded(
            sqlx::query_as::<_, Room>("SELECT id, room_name, created_at, updated_at FROM room WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
        ).await?
            .ok_or(AppError::NotFound(format!("Room {} not found", id)))
    }

    async fn all_rooms(&self) -> Result<Vec<Room>, AppError> {
        bounded(
            sqlx::query_as::<_, Room>("SELECT id, room_name, created_at, updated_at FROM room ORDER BY id")
                .fetch_all(&self.pool)
        ).await
    }
}
