use crate::domain::models::{
    room::Room, reservation::{Reservation, NewReservation, GuestUpdate},
    restriction::RoomRestriction, user::{User, NewUser}, mail::MailData,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// True when no restriction on `room_id` overlaps `start..end` (touching ranges do not overlap).
    async fn is_room_available(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> Result<bool, AppError>;
    async fn find_available_rooms(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Room>, AppError>;
    async fn get_room(&self, id: i64) -> Result<Room, AppError>;
    async fn all_rooms(&self) -> Result<Vec<Room>, AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts the reservation and the restriction blocking its dates in one transaction.
    async fn create_with_restriction(&self, reservation: &NewReservation) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;
    async fn list_all(&self) -> Result<Vec<Reservation>, AppError>;
    async fn list_new(&self) -> Result<Vec<Reservation>, AppError>;
    async fn update_guest(&self, id: i64, guest: &GuestUpdate) -> Result<(), AppError>;
    async fn set_processed(&self, id: i64, processed: i32) -> Result<(), AppError>;
    /// Removes the reservation together with its restrictions.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait RestrictionRepository: Send + Sync {
    async fn list_for_room_by_range(&self, room_id: i64, start: NaiveDate, end: NaiveDate) -> Result<Vec<RoomRestriction>, AppError>;
    /// Blocks the night of `date`, stored as `date..date + 1`.
    async fn insert_block(&self, room_id: i64, date: NaiveDate) -> Result<(), AppError>;
    /// Only deletes manual blocks; reservation-caused rows are left alone.
    async fn delete_block(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, mail: &MailData) -> Result<(), AppError>;
}
