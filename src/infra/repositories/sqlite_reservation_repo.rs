use crate::domain::{
    models::{reservation::{GuestUpdate, NewReservation, Reservation}, restriction::RESTRICTION_RESERVATION},
    ports::ReservationRepository,
};
use crate::error::AppError;
use crate::infra::repositories::bounded;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqlitePool, Row};

const SELECT_RESERVATION: &str = r#"
    SELECT r.id, r.first_name, r.last_name, r.email, r.phone, r.start_date, r.end_date,
           r.room_id, rm.room_name, r.processed, r.created_at, r.updated_at
    FROM reservation r
    INNER JOIN room rm ON rm.id = r.room_id"#;

pub struct SqliteReservationRepo {
    pool: SqlitePool,
}

impl SqliteReservationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn create_with_restriction(&self, res: &NewReservation) -> Result<Reservation, AppError> {
        let now = Utc::now();
        bounded(async {
            let mut tx = self.pool.begin().await?;

            let row = sqlx::query(
                r#"INSERT INTO reservation (first_name, last_name, email, phone, start_date, end_date, room_id, processed, created_at, updated_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
                   RETURNING id"#
            )
                .bind(&res.first_name).bind(&res.last_name).bind(&res.email).bind(&res.phone)
                .bind(res.start_date).bind(res.end_date).bind(res.room_id).bind(now).bind(now)
                .fetch_one(&mut *tx).await?;
            let id: i64 = row.get("id");

            sqlx::query(
                r#"INSERT INTO room_restriction (start_date, end_date, room_id, reservation_id, restriction_id, created_at, updated_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?)"#
            )
                .bind(res.start_date).bind(res.end_date).bind(res.room_id).bind(id)
                .bind(RESTRICTION_RESERVATION).bind(now).bind(now)
                .execute(&mut *tx).await?;

            tx.commit().await?;

            Ok::<_, sqlx::Error>(Reservation {
                id,
                first_name: res.first_name.clone(),
                last_name: res.last_name.clone(),
                email: res.email.clone(),
                phone: res.phone.clone(),
                start_date: res.start_date,
                end_date: res.end_date,
                room_id: res.room_id,
                room_name: res.room_name.clone(),
                processed: 0,
                created_at: now,
                updated_at: now,
            })
        }).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        bounded(
            sqlx::query_as::<_, Reservation>(&format!("{} WHERE r.id = ?", SELECT_RESERVATION))
                .bind(id)
                .fetch_optional(&self.pool)
        ).await
    }

    async fn list_all(&self) -> Result<Vec<Reservation>, AppError> {
        bounded(
            sqlx::query_as::<_, Reservation>(&format!("{} ORDER BY r.start_date ASC, r.id ASC", SELECT_RESERVATION))
                .fetch_all(&self.pool)
        ).await
    }

    async fn list_new(&self) -> Result<Vec<Reservation>, AppError> {
        bounded(
            sqlx::query_as::<_, Reservation>(&format!("{} WHERE r.processed = 0 ORDER BY r.start_date ASC, r.id ASC", SELECT_RESERVATION))
                .fetch_all(&self.pool)
        ).await
    }

    async fn update_guest(&self, id: i64, guest: &GuestUpdate) -> Result<(), AppError> {
        let result = bounded(
            sqlx::query("UPDATE reservation SET first_name = ?, last_name = ?, email = ?, phone = ?, updated_at = ? WHERE id = ?")
                .bind(&guest.first_name).bind(&guest.last_name).bind(&guest.email).bind(&guest.phone)
                .bind(Utc::now()).bind(id)
                .execute(&self.pool)
        ).await?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound(format!("Reservation {} not found", id))); }
        Ok(())
    }

    async fn set_processed(&self, id: i64, processed: i32) -> Result<(), AppError> {
        let result = bounded(
            sqlx::query("UPDATE reservation SET processed = ?, updated_at = ? WHERE id = ?")
                .bind(processed).bind(Utc::now()).bind(id)
                .execute(&self.pool)
        ).await?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound(format!("Reservation {} not found", id))); }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = bounded(async {
            let mut tx = self.pool.begin().await?;
            sqlx::query("DELETE FROM room_restriction WHERE reservation_id = ?").bind(id).execute(&mut *tx).await?;
            let result = sqlx::query("DELETE FROM reservation WHERE id = ?").bind(id).execute(&mut *tx).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(result.rows_affected())
        }).await?;
        if deleted == 0 { return Err(AppError::NotFound(format!("Reservation {} not found", id))); }
        Ok(())
    }
}
