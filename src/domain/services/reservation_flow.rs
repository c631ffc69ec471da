//! Transitions of the booking workflow. Handlers load the [`WorkflowState`]
//! from the session, call into here, and store whatever stage comes back.

use crate::domain::models::{
    mail::MailData,
    reservation::Reservation,
    room::Room,
    workflow::{BookingStage, ReservationDraft, WorkflowState},
};
use crate::domain::ports::ReservationRepository;
use crate::domain::services::forms::Form;
use crate::error::AppError;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::info;

pub const CONFIRMATION_SUBJECT: &str = "Reservation Confirmation";
pub const FIRST_NAME_MIN_LENGTH: usize = 10;

pub enum DetailsOutcome {
    Valid(ReservationDraft),
    Invalid(ReservationDraft, Form),
}

pub enum SummaryOutcome {
    Show(Reservation),
    Missing,
}

/// Dates picked on the search page; kept even when nothing is free.
pub fn select_dates(start_date: NaiveDate, end_date: NaiveDate) -> BookingStage {
    BookingStage::DatesSelected { start_date, end_date }
}

/// Attaches a room to whatever reservation is in progress.
pub fn choose_room(state: WorkflowState, room: &Room) -> Result<BookingStage, AppError> {
    let stage = match state {
        WorkflowState::Present(stage) => stage,
        WorkflowState::Absent => return Err(AppError::SessionStateMissing),
    };

    let (start_date, end_date) = stage.dates();
    let draft = match stage {
        BookingStage::RoomChosen(mut draft) => {
            draft.room_id = room.id;
            draft.room_name = room.room_name.clone();
            draft
        }
        _ => ReservationDraft::for_room(start_date, end_date, room.id, room.room_name.clone()),
    };

    Ok(BookingStage::RoomChosen(draft))
}

/// Direct "book this room" entry: starts a fresh workflow with room and dates set.
pub fn book_room(room: &Room, start_date: NaiveDate, end_date: NaiveDate) -> BookingStage {
    BookingStage::RoomChosen(ReservationDraft::for_room(start_date, end_date, room.id, room.room_name.clone()))
}

pub fn require_room_chosen(state: WorkflowState) -> Result<ReservationDraft, AppError> {
    match state {
        WorkflowState::Present(BookingStage::RoomChosen(draft)) => Ok(draft),
        WorkflowState::Present(other) => {
            info!("Reservation form requested while workflow is at stage {}", other.name());
            Err(AppError::SessionStateMissing)
        }
        WorkflowState::Absent => Err(AppError::SessionStateMissing),
    }
}

pub fn validate_guest_details(values: HashMap<String, String>) -> Form {
    let mut form = Form::new(values);
    form.required(&["first_name", "last_name", "email"])
        .min_length("first_name", FIRST_NAME_MIN_LENGTH)
        .is_email("email");
    form
}

/// Merges the submitted guest fields into the draft and checks them.
pub fn submit_details(mut draft: ReservationDraft, values: HashMap<String, String>) -> DetailsOutcome {
    let form = validate_guest_details(values);

    draft.first_name = form.get("first_name").to_string();
    draft.last_name = form.get("last_name").to_string();
    draft.email = form.get("email").to_string();
    draft.phone = form.get("phone").to_string();

    if form.valid() {
        DetailsOutcome::Valid(draft)
    } else {
        DetailsOutcome::Invalid(draft, form)
    }
}

pub async fn persist(repo: &dyn ReservationRepository, draft: &ReservationDraft) -> Result<BookingStage, AppError> {
    let reservation = repo.create_with_restriction(&draft.to_new_reservation()).await?;
    info!(
        reservation_id = reservation.id,
        room_id = reservation.room_id,
        "Reservation stored for {} to {}", reservation.start_date, reservation.end_date
    );
    Ok(BookingStage::Persisted(reservation))
}

/// The summary can only be shown once, and only for a stored reservation.
pub fn take_summary(state: WorkflowState) -> SummaryOutcome {
    match state {
        WorkflowState::Present(BookingStage::Persisted(reservation)) => SummaryOutcome::Show(reservation),
        _ => SummaryOutcome::Missing,
    }
}

pub fn confirmation_mail(reservation: &Reservation, from: &str, html_body: String) -> MailData {
    MailData {
        to: reservation.email.clone(),
        from: from.to_string(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        content: html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room(id: i64, name: &str) -> Room {
        Room { id, room_name: name.to_string(), created_at: Utc::now(), updated_at: Utc::now() }
    }

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn choosing_a_room_requires_a_search_first() {
        let result = choose_room(WorkflowState::Absent, &room(1, "General's Quarters"));
        assert!(matches!(result, Err(AppError::SessionStateMissing)));
    }

    #[test]
    fn choosing_a_room_keeps_searched_dates() {
        let state = WorkflowState::Present(select_dates(d("2024-03-01"), d("2024-03-05")));
        let stage = choose_room(state, &room(2, "Major's Suite")).unwrap();
        match stage {
            BookingStage::RoomChosen(draft) => {
                assert_eq!(draft.room_id, 2);
                assert_eq!(draft.room_name, "Major's Suite");
                assert_eq!(draft.start_date, d("2024-03-01"));
                assert_eq!(draft.end_date, d("2024-03-05"));
            }
            other => panic!("unexpected stage {:?}", other),
        }
    }

    #[test]
    fn form_needs_a_chosen_room() {
        let state = WorkflowState::Present(select_dates(d("2024-03-01"), d("2024-03-05")));
        assert!(matches!(require_room_chosen(state), Err(AppError::SessionStateMissing)));
    }

    #[test]
    fn short_first_name_is_rejected_even_when_everything_else_is_fine() {
        let draft = ReservationDraft::for_room(d("2024-03-01"), d("2024-03-05"), 1, "A".into());
        let outcome = submit_details(draft, values(&[
            ("first_name", "Jane"), ("last_name", "Doe"), ("email", "jane@x.com"), ("phone", "555"),
        ]));
        match outcome {
            DetailsOutcome::Invalid(draft, form) => {
                assert!(form.error("first_name").is_some());
                assert!(form.error("last_name").is_none());
                assert!(form.error("email").is_none());
                assert_eq!(draft.first_name, "Jane");
                assert_eq!(draft.phone, "555");
            }
            DetailsOutcome::Valid(_) => panic!("short first name accepted"),
        }
    }

    #[test]
    fn complete_details_are_valid() {
        let draft = ReservationDraft::for_room(d("2024-03-01"), d("2024-03-05"), 1, "A".into());
        let outcome = submit_details(draft, values(&[
            ("first_name", "Jane Smithson"), ("last_name", "Doe"), ("email", "jane@x.com"), ("phone", "555"),
        ]));
        assert!(matches!(outcome, DetailsOutcome::Valid(ref d) if d.last_name == "Doe"));
    }

    #[test]
    fn summary_only_for_persisted_stage() {
        assert!(matches!(take_summary(WorkflowState::Absent), SummaryOutcome::Missing));
        let state = WorkflowState::Present(select_dates(d("2024-03-01"), d("2024-03-05")));
        assert!(matches!(take_summary(state), SummaryOutcome::Missing));
    }
}
