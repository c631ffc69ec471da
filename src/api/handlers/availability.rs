use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use std::sync::Arc;
use tera::Context;
use tracing::{error, info};

use crate::api::dtos::{
    requests::{AvailabilityCheckForm, SearchForm},
    responses::AvailabilityResponse,
};
use crate::api::extractors::web_session::{FlashKind, WebSession};
use crate::api::views::render_page;
use crate::domain::services::{
    availability::{parse_booking_date, parse_date_or_zero, search_rooms, SearchOutcome},
    reservation_flow::select_dates,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn search_page(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    render_page(&state, &session, "search-availability.html", Context::new()).await
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    session: WebSession,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let start = parse_booking_date(&form.start)?;
    let end = parse_booking_date(&form.end)?;

    let outcome = search_rooms(state.room_repo.as_ref(), start, end).await?;
    session.set_stage(&select_dates(start, end)).await?;

    match outcome {
        SearchOutcome::NoAvailability => {
            session.put_flash(FlashKind::Error, "No Availability").await?;
            Ok(Redirect::to("/search-availability").into_response())
        }
        SearchOutcome::Rooms(rooms) => {
            let mut context = Context::new();
            context.insert("rooms", &rooms);
            context.insert("start_date", &form.start);
            context.insert("end_date", &form.end);
            Ok(render_page(&state, &session, "choose-room.html", context).await?.into_response())
        }
    }
}

/// Stateless availability check used by the room pages' booking modal.
pub async fn check_room(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AvailabilityCheckForm>,
) -> Json<AvailabilityResponse> {
    let start = parse_date_or_zero(&form.start_date);
    let end = parse_date_or_zero(&form.end_date);
    let room_id = form.room_id.parse::<i64>().unwrap_or(0);

    let (ok, message) = match state.room_repo.is_room_available(room_id, start, end).await {
        Ok(available) => {
            info!(room_id, available, "Availability check for {} to {}", start, end);
            (available, String::new())
        }
        Err(e) => {
            error!("Availability check failed: {}", e);
            (false, "Error querying database".to_string())
        }
    };

    Json(AvailabilityResponse {
        ok,
        message,
        room_id: room_id.to_string(),
        start_date: form.start_date,
        end_date: form.end_date,
    })
}
