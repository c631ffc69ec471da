use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use std::sync::Arc;
use tera::Context;
use tracing::info;

use crate::api::dtos::requests::{MonthQuery, UpdateReservationForm};
use crate::api::extractors::{
    admin::AdminUser,
    web_session::{FlashKind, WebSession},
};
use crate::api::views::render_page;
use crate::domain::models::reservation::GuestUpdate;
use crate::domain::services::forms::Form as GuestForm;
use crate::error::AppError;
use crate::state::AppState;

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    AdminUser(user_id): AdminUser,
    session: WebSession,
) -> Result<Html<String>, AppError> {
    let user = state.user_repo.find_by_id(user_id).await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let mut context = Context::new();
    context.insert("user", &user);
    render_page(&state, &session, "admin/dashboard.html", context).await
}

pub async fn new_reservations(
    State(state): State<Arc<AppState>>,
    AdminUser(_user_id): AdminUser,
    session: WebSession,
) -> Result<Html<String>, AppError> {
    let reservations = state.reservation_repo.list_new().await?;
    let mut context = Context::new();
    context.insert("reservations", &reservations);
    render_page(&state, &session, "admin/reservations-new.html", context).await
}

pub async fn all_reservations(
    State(state): State<Arc<AppState>>,
    AdminUser(_user_id): AdminUser,
    session: WebSession,
) -> Result<Html<String>, AppError> {
    let reservations = state.reservation_repo.list_all().await?;
    let mut context = Context::new();
    context.insert("reservations", &reservations);
    render_page(&state, &session, "admin/reservations-all.html", context).await
}

pub async fn show_reservation(
    State(state): State<Arc<AppState>>,
    AdminUser(_user_id): AdminUser,
    session: WebSession,
    Path((src, id)): Path<(String, i64)>,
    Query(month): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let reservation = state.reservation_repo.find_by_id(id).await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

    let mut context = Context::new();
    context.insert("reservation", &reservation);
    context.insert("src", &src);
    context.insert("year", &month.y);
    context.insert("month", &month.m);
    context.insert("form", &GuestForm::empty());
    render_page(&state, &session, "admin/reservation-show.html", context).await
}

pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    AdminUser(user_id): AdminUser,
    session: WebSession,
    Path((src, id)): Path<(String, i64)>,
    Form(form): Form<UpdateReservationForm>,
) -> Result<Redirect, AppError> {
    let guest = GuestUpdate {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
    };
    state.reservation_repo.update_guest(id, &guest).await?;
    info!(user_id, reservation_id = id, "Reservation guest details updated");

    session.put_flash(FlashKind::Flash, "Changes saved").await?;
    Ok(back_to(&src, &form.year, &form.month))
}

pub async fn process_reservation(
    State(state): State<Arc<AppState>>,
    AdminUser(user_id): AdminUser,
    session: WebSession,
    Path((src, id)): Path<(String, i64)>,
    Query(month): Query<MonthQuery>,
) -> Result<Redirect, AppError> {
    state.reservation_repo.set_processed(id, 1).await?;
    info!(user_id, reservation_id = id, "Reservation processed");

    session.put_flash(FlashKind::Flash, "Reservation marked as processed").await?;
    Ok(back_to(&src, &month.y, &month.m))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    AdminUser(user_id): AdminUser,
    session: WebSession,
    Path((src, id)): Path<(String, i64)>,
    Query(month): Query<MonthQuery>,
) -> Result<Redirect, AppError> {
    state.reservation_repo.delete(id).await?;
    info!(user_id, reservation_id = id, "Reservation deleted");

    session.put_flash(FlashKind::Flash, "Reservation deleted").await?;
    Ok(back_to(&src, &month.y, &month.m))
}

/// Back to the calendar month the admin came from, or else to the list named by `src`.
fn back_to(src: &str, year: &str, month: &str) -> Redirect {
    if let (Ok(y), Ok(m)) = (year.parse::<i32>(), month.parse::<u32>()) {
        return Redirect::to(&format!("/admin/reservation-calendar?y={}&m={}", y, m));
    }
    let list = if src == "new" { "new" } else { "all" };
    Redirect::to(&format!("/admin/reservation-{}", list))
}
