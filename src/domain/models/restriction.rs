use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// `restriction.id` of rows caused by a confirmed reservation.
pub const RESTRICTION_RESERVATION: i64 = 1;
/// `restriction.id` of manual blocks added from the admin calendar.
pub const RESTRICTION_OWNER_BLOCK: i64 = 2;

/// A row marking a room unavailable, either for a reservation or as a manual block.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RoomRestriction {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub room_id: i64,
    pub reservation_id: Option<i64>,
    pub restriction_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoomRestriction {
    /// Reservation-caused rows can only go away together with their reservation.
    pub fn is_reservation(&self) -> bool {
        self.reservation_id.unwrap_or(0) > 0
    }
}
