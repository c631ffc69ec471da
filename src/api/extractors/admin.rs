use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{Span, warn};

use crate::api::extractors::web_session::{FlashKind, WebSession};

/// Id of the logged-in back-office user. Anonymous requests are sent to the login page.
pub struct AdminUser(pub i64);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = WebSession::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.user_id().await {
            Ok(Some(user_id)) => {
                Span::current().record("user_id", user_id);
                Ok(AdminUser(user_id))
            }
            Ok(None) => {
                warn!("Anonymous request to {}", parts.uri.path());
                if let Err(e) = session.put_flash(FlashKind::Error, "Log in first!").await {
                    return Err(e.into_response());
                }
                Err(Redirect::to("/user/login").into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
