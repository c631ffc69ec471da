use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info, warn};

use crate::api::dtos::requests::BookRoomQuery;
use crate::api::extractors::web_session::{FlashKind, WebSession};
use crate::api::views::render_page;
use crate::domain::models::{
    reservation::Reservation,
    workflow::{BookingStage, ReservationDraft, WorkflowState},
};
use crate::domain::services::{
    availability::parse_booking_date,
    forms::Form as GuestForm,
    reservation_flow::{self, DetailsOutcome, SummaryOutcome},
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn choose_room(
    State(state): State<Arc<AppState>>,
    session: WebSession,
    Path(room_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let workflow = session.workflow().await?;
    // Checked before the lookup so a missing search wins over an unknown room.
    if matches!(workflow, WorkflowState::Absent) {
        return Err(AppError::SessionStateMissing);
    }
    let room = state.room_repo.get_room(room_id).await?;

    let stage = reservation_flow::choose_room(workflow, &room)?;
    session.set_stage(&stage).await?;

    Ok(Redirect::to("/make-reservation"))
}

/// Entry from a room page: room and dates arrive in the query string.
pub async fn book_room(
    State(state): State<Arc<AppState>>,
    session: WebSession,
    Query(query): Query<BookRoomQuery>,
) -> Result<Redirect, AppError> {
    let room_id = query.id.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid room id '{}'", query.id)))?;
    let room = state.room_repo.get_room(room_id).await?;
    let start = parse_booking_date(&query.s)?;
    let end = parse_booking_date(&query.e)?;

    session.set_stage(&reservation_flow::book_room(&room, start, end)).await?;

    Ok(Redirect::to("/make-reservation"))
}

pub async fn reservation_form(
    State(state): State<Arc<AppState>>,
    session: WebSession,
) -> Result<Html<String>, AppError> {
    let draft = reservation_flow::require_room_chosen(session.workflow().await?)?;
    render_form(&state, &session, &draft, &GuestForm::empty()).await
}

pub async fn submit_reservation(
    State(state): State<Arc<AppState>>,
    session: WebSession,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let draft = reservation_flow::require_room_chosen(session.workflow().await?)?;

    match reservation_flow::submit_details(draft, values) {
        DetailsOutcome::Invalid(draft, form) => {
            info!(errors = form.errors().len(), "Reservation details rejected");
            session.set_stage(&BookingStage::RoomChosen(draft.clone())).await?;
            Ok(render_form(&state, &session, &draft, &form).await?.into_response())
        }
        DetailsOutcome::Valid(draft) => {
            // Blocks or other bookings may have landed since the room was picked.
            if !state.room_repo.is_room_available(draft.room_id, draft.start_date, draft.end_date).await? {
                warn!(room_id = draft.room_id, "Room taken for {} to {} before submit", draft.start_date, draft.end_date);
                session.clear_workflow().await?;
                session.put_flash(FlashKind::Error, "No Availability").await?;
                return Ok(Redirect::to("/search-availability").into_response());
            }
            let stage = reservation_flow::persist(state.reservation_repo.as_ref(), &draft).await?;
            if let BookingStage::Persisted(reservation) = &stage {
                queue_confirmation(&state, reservation);
            }
            session.set_stage(&stage).await?;
            Ok(Redirect::to("/reservation-summary").into_response())
        }
    }
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
    session: WebSession,
) -> Result<Response, AppError> {
    match reservation_flow::take_summary(session.workflow().await?) {
        SummaryOutcome::Show(reservation) => {
            session.clear_workflow().await?;

            let mut context = Context::new();
            context.insert("start_date", &reservation.start_date.to_string());
            context.insert("end_date", &reservation.end_date.to_string());
            context.insert("reservation", &reservation);
            Ok(render_page(&state, &session, "reservation-summary.html", context).await?.into_response())
        }
        SummaryOutcome::Missing => {
            warn!("Reservation summary requested without a stored reservation");
            session.put_flash(FlashKind::Warning, "Can't get reservation from session").await?;
            Ok(Redirect::temporary("/").into_response())
        }
    }
}

async fn render_form(
    state: &AppState,
    session: &WebSession,
    draft: &ReservationDraft,
    form: &GuestForm,
) -> Result<Html<String>, AppError> {
    let mut context = Context::new();
    context.insert("reservation", draft);
    context.insert("start_date", &draft.start_date.to_string());
    context.insert("end_date", &draft.end_date.to_string());
    context.insert("form", form);
    render_page(state, session, "make-reservation.html", context).await
}

/// The reservation is already stored, so a mail that cannot be rendered is only logged.
fn queue_confirmation(state: &AppState, reservation: &Reservation) {
    let mut context = Context::new();
    context.insert("first_name", &reservation.first_name);
    context.insert("room_name", &reservation.room_name);
    context.insert("start_date", &reservation.start_date.to_string());
    context.insert("end_date", &reservation.end_date.to_string());

    match state.templates.render("email/confirmation.html", &context) {
        Ok(body) => {
            let mail = reservation_flow::confirmation_mail(reservation, &state.config.mail_from, body);
            state.mail_queue.enqueue(mail);
        }
        Err(e) => error!(reservation_id = reservation.id, "Confirmation mail not rendered: {}", e),
    }
}
