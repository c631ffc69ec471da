//! The in-progress reservation carried in the visitor's session between
//! "search availability" and "reservation summary".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::reservation::{NewReservation, Reservation};

/// Session key holding the current [`BookingStage`].
pub const RESERVATION_SESSION_KEY: &str = "reservation";

/// Guest data collected so far for a chosen room.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ReservationDraft {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub room_id: i64,
    pub room_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ReservationDraft {
    pub fn for_room(start_date: NaiveDate, end_date: NaiveDate, room_id: i64, room_name: String) -> Self {
        Self {
            start_date,
            end_date,
            room_id,
            room_name,
            ..Default::default()
        }
    }

    pub fn to_new_reservation(&self) -> NewReservation {
        NewReservation {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            room_id: self.room_id,
            room_name: self.room_name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "stage", content = "data")]
pub enum BookingStage {
    DatesSelected { start_date: NaiveDate, end_date: NaiveDate },
    RoomChosen(ReservationDraft),
    Persisted(Reservation),
}

impl BookingStage {
    pub fn dates(&self) -> (NaiveDate, NaiveDate) {
        match self {
            BookingStage::DatesSelected { start_date, end_date } => (*start_date, *end_date),
            BookingStage::RoomChosen(draft) => (draft.start_date, draft.end_date),
            BookingStage::Persisted(res) => (res.start_date, res.end_date),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BookingStage::DatesSelected { .. } => "dates_selected",
            BookingStage::RoomChosen(_) => "room_chosen",
            BookingStage::Persisted(_) => "persisted",
        }
    }
}

/// What the session holds for the booking workflow.
#[derive(Debug, Clone)]
pub enum WorkflowState {
    Absent,
    Present(BookingStage),
}

impl From<Option<BookingStage>> for WorkflowState {
    fn from(value: Option<BookingStage>) -> Self {
        match value {
            Some(stage) => WorkflowState::Present(stage),
            None => WorkflowState::Absent,
        }
    }
}
