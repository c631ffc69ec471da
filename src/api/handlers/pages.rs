use axum::{extract::State, response::Html};
use std::sync::Arc;
use tera::Context;

use crate::api::extractors::web_session::WebSession;
use crate::api::views::render_page;
use crate::error::AppError;
use crate::state::AppState;

pub async fn home(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    render_page(&state, &session, "home.html", Context::new()).await
}

pub async fn about(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    render_page(&state, &session, "about.html", Context::new()).await
}

pub async fn generals_quarters(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    render_page(&state, &session, "general.html", Context::new()).await
}

pub async fn majors_suite(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    render_page(&state, &session, "suite.html", Context::new()).await
}

pub async fn contact(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    render_page(&state, &session, "contact.html", Context::new()).await
}
