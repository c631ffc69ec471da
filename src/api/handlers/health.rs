use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dtos::responses::HealthResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Liveness plus a database round trip.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    let rooms = state.room_repo.all_rooms().await?;
    Ok(Json(HealthResponse { status: "ok", rooms: rooms.len() }))
}
