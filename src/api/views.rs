use axum::response::Html;
use tera::Context;

use crate::api::extractors::web_session::WebSession;
use crate::error::AppError;
use crate::state::AppState;

/// Renders a page with the data every template expects: the one-shot
/// `flash`/`error`/`warning` messages and whether someone is logged in.
pub async fn render_page(
    state: &AppState,
    session: &WebSession,
    template: &str,
    mut context: Context,
) -> Result<Html<String>, AppError> {
    let flashes = session.pop_flashes().await?;
    context.insert("flash", &flashes.flash.unwrap_or_default());
    context.insert("error", &flashes.error.unwrap_or_default());
    context.insert("warning", &flashes.warning.unwrap_or_default());
    context.insert("is_authenticated", &session.user_id().await?.is_some());

    let body = state.templates.render(template, &context)?;
    Ok(Html(body))
}
