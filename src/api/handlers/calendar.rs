use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use chrono::{Datelike, Local};
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;
use tracing::{error, info, warn};

use crate::api::dtos::requests::MonthQuery;
use crate::api::extractors::{
    admin::AdminUser,
    web_session::{FlashKind, WebSession},
};
use crate::api::views::render_page;
use crate::domain::services::calendar::{
    build_room_month, calendar_room, reconcile_blocks, DayMap, Month,
};
use crate::error::AppError;
use crate::state::AppState;

fn requested_month(year: &str, month: &str) -> Month {
    year.parse::<i32>()
        .ok()
        .zip(month.parse::<u32>().ok())
        .and_then(|(y, m)| Month::new(y, m))
        .unwrap_or_else(|| Month::containing(Local::now().date_naive()))
}

fn form_value<'a>(fields: &'a [(String, String)], name: &str) -> &'a str {
    fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str()).unwrap_or("")
}

/// Renders one month for every room and remembers which blocks were shown, so the
/// save handler can tell which ones the admin unticked.
pub async fn show_calendar(
    State(state): State<Arc<AppState>>,
    AdminUser(_user_id): AdminUser,
    session: WebSession,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let month = requested_month(&query.y, &query.m);
    let rooms = state.room_repo.all_rooms().await?;

    let mut calendar = Vec::with_capacity(rooms.len());
    for room in rooms {
        let restrictions = state.restriction_repo
            .list_for_room_by_range(room.id, month.first, month.last)
            .await?;
        let grid = build_room_month(&month, &restrictions);
        session.put_blocked(room.id, &grid.blocked).await?;
        calendar.push(calendar_room(room, &month, &grid));
    }

    let (previous, next) = (month.previous(), month.next());
    let mut context = Context::new();
    context.insert("rooms", &calendar);
    context.insert("year", &month.first.year());
    context.insert("month", &month.first.month());
    context.insert("month_name", &month.first.format("%B").to_string());
    context.insert("days_in_month", &month.days_in_month());
    context.insert("previous_year", &previous.first.year());
    context.insert("previous_month", &previous.first.month());
    context.insert("next_year", &next.first.year());
    context.insert("next_month", &next.first.month());
    render_page(&state, &session, "admin/reservation-calendar.html", context).await
}

/// Applies the checkbox diff. A failing delete or insert is logged and the rest
/// still go through.
///
/// The snapshot lives in the session of whoever rendered the page, so two admins
/// saving the same month overwrite each other's changes.
pub async fn save_calendar(
    State(state): State<Arc<AppState>>,
    AdminUser(user_id): AdminUser,
    session: WebSession,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let month = requested_month(form_value(&fields, "y"), form_value(&fields, "m"));

    let mut snapshots: HashMap<i64, DayMap> = HashMap::new();
    for room in state.room_repo.all_rooms().await? {
        let snapshot = match session.blocked(room.id).await? {
            Some(snapshot) => snapshot,
            None => {
                warn!(room_id = room.id, "No calendar snapshot in session, nothing will be unblocked");
                DayMap::new()
            }
        };
        snapshots.insert(room.id, snapshot);
    }

    let changes = reconcile_blocks(&snapshots, &fields);

    for block_id in &changes.delete {
        if let Err(e) = state.restriction_repo.delete_block(*block_id).await {
            error!(block_id, "Failed to remove block: {}", e);
        }
    }
    for (room_id, date) in &changes.add {
        match state.restriction_repo.insert_block(*room_id, *date).await {
            Ok(()) => info!(room_id, "Blocked {}", date),
            Err(e) => error!(room_id, "Failed to block {}: {}", date, e),
        }
    }

    info!(user_id, removed = changes.delete.len(), added = changes.add.len(), "Calendar saved");
    session.put_flash(FlashKind::Flash, "Changes saved").await?;

    Ok(Redirect::to(&format!(
        "/admin/reservation-calendar?y={}&m={}",
        month.first.year(),
        month.first.month()
    )))
}
