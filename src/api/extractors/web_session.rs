use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::domain::models::workflow::{BookingStage, WorkflowState, RESERVATION_SESSION_KEY};
use crate::domain::services::calendar::{blocked_session_key, DayMap};
use crate::error::AppError;

pub const USER_ID_KEY: &str = "user_id";

#[derive(Debug, Clone, Copy)]
pub enum FlashKind {
    Flash,
    Error,
    Warning,
}

impl FlashKind {
    fn key(self) -> &'static str {
        match self {
            FlashKind::Flash => "flash",
            FlashKind::Error => "error",
            FlashKind::Warning => "warning",
        }
    }
}

/// One-shot messages shown on the next rendered page.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Flashes {
    pub flash: Option<String>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

/// Typed view over the visitor's session. Every value the site keeps per visitor
/// goes through here, so nothing is read back with an ad hoc key or type.
pub struct WebSession(pub Session);

impl<S> FromRequestParts<S> for WebSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(format!("Session layer missing: {}", msg)))?;
        Ok(WebSession(session))
    }
}

impl WebSession {
    pub async fn workflow(&self) -> Result<WorkflowState, AppError> {
        let stage = self.0.get::<BookingStage>(RESERVATION_SESSION_KEY).await?;
        Ok(WorkflowState::from(stage))
    }

    pub async fn set_stage(&self, stage: &BookingStage) -> Result<(), AppError> {
        self.0.insert(RESERVATION_SESSION_KEY, stage).await?;
        Ok(())
    }

    pub async fn clear_workflow(&self) -> Result<(), AppError> {
        self.0.remove::<BookingStage>(RESERVATION_SESSION_KEY).await?;
        Ok(())
    }

    pub async fn put_flash(&self, kind: FlashKind, message: impl Into<String>) -> Result<(), AppError> {
        self.0.insert(kind.key(), message.into()).await?;
        Ok(())
    }

    pub async fn pop_flashes(&self) -> Result<Flashes, AppError> {
        Ok(Flashes {
            flash: self.0.remove::<String>(FlashKind::Flash.key()).await?,
            error: self.0.remove::<String>(FlashKind::Error.key()).await?,
            warning: self.0.remove::<String>(FlashKind::Warning.key()).await?,
        })
    }

    pub async fn user_id(&self) -> Result<Option<i64>, AppError> {
        Ok(self.0.get::<i64>(USER_ID_KEY).await?)
    }

    /// Starts an authenticated session under a fresh id.
    pub async fn log_in(&self, user_id: i64) -> Result<(), AppError> {
        self.0.cycle_id().await?;
        self.0.insert(USER_ID_KEY, user_id).await?;
        Ok(())
    }

    pub async fn log_out(&self) -> Result<(), AppError> {
        self.0.flush().await?;
        Ok(())
    }

    pub async fn put_blocked(&self, room_id: i64, blocked: &DayMap) -> Result<(), AppError> {
        self.0.insert(&blocked_session_key(room_id), blocked).await?;
        Ok(())
    }

    pub async fn blocked(&self, room_id: i64) -> Result<Option<DayMap>, AppError> {
        Ok(self.0.get::<DayMap>(&blocked_session_key(room_id)).await?)
    }
}
