use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;
use tracing::{info, warn};

use crate::api::extractors::web_session::{FlashKind, WebSession};
use crate::api::views::render_page;
use crate::domain::services::forms::Form as LoginForm;
use crate::error::AppError;
use crate::state::AppState;

pub async fn login_page(State(state): State<Arc<AppState>>, session: WebSession) -> Result<Html<String>, AppError> {
    let mut context = Context::new();
    context.insert("form", &LoginForm::empty());
    render_page(&state, &session, "login.html", context).await
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: WebSession,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let mut form = LoginForm::new(values);
    form.required(&["email", "password"]).is_email("email");
    if !form.valid() {
        let mut context = Context::new();
        context.insert("form", &form);
        return Ok(render_page(&state, &session, "login.html", context).await?.into_response());
    }

    match state.auth_service.authenticate(form.get("email"), form.get("password")).await {
        Ok(user) => {
            session.log_in(user.id).await?;
            session.put_flash(FlashKind::Flash, "Logged in successfully").await?;
            info!(user_id = user.id, "User logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Unauthorized) => {
            warn!("Failed login for {}", form.get("email"));
            session.put_flash(FlashKind::Error, "Invalid login credentials").await?;
            Ok(Redirect::to("/user/login").into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout(session: WebSession) -> Result<Redirect, AppError> {
    session.log_out().await?;
    Ok(Redirect::to("/user/login"))
}
