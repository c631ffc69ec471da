use crate::domain::{
    models::restriction::{RoomRestriction, RESTRICTION_OWNER_BLOCK},
    ports::RestrictionRepository,
};
use crate::error::AppError;
use crate::infra::repositories::bounded;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::warn;

pub struct PostgresRestrictionRepo {
    pool: PgPool,
}

impl PostgresRestrictionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestrictionRepository for PostgresRestrictionRepo {
    async fn list_for_room_by_range(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> Result<Vec<RoomRestriction>, AppError> {
        bounded(
            sqlx::query_as::<_, RoomRestriction>(
                r#"SELECT id, start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at
                   FROM room_restriction
                   WHERE $1 <= end_date AND $2 >= start_date AND room_id = $3
                   ORDER BY start_date ASC, id ASC"#
            )
                .bind(start)
                .bind(end)
                .bind(room_id)
                .fetch_all(&self.pool)
        ).await
    }

    async fn insert_block(&self, room_id: i64, date: NaiveDate) -> Result<(), AppError> {
        let until = date.succ_opt()
            .ok_or_else(|| AppError::Validation(format!("Cannot block {}", date)))?;
        let now = Utc::now();
        bounded(
            sqlx::query(
                r#"INSERT INTO room_restriction (start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at)
                   VALUES ($1, $2, $3, NULL, $4, $5, $6)"#
            )
                .bind(date).bind(until).bind(room_id).bind(RESTRICTION_OWNER_BLOCK).bind(now).bind(now)
                .execute(&self.pool)
        ).await?;
        Ok(())
    }

    async fn delete_block(&self, id: i64) -> Result<(), AppError> {
        let result = bounded(
            sqlx::query("DELETE FROM room_restriction WHERE id = $1 AND reservation_id IS NULL")
                .bind(id)
                .execute(&self.pool)
        ).await?;
        if result.rows_affected() == 0 {
            warn!("Block {} not deleted: missing or owned by a reservation", id);
            return Err(AppError::NotFound(format!("Block {} not found", id)));
        }
        Ok(())
    }
}
