use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    AvailabilityRepository, ReservationRepository, RestrictionRepository, UserRepository,
};
use crate::domain::services::{auth_service::AuthService, mail_queue::MailQueue};
use crate::infra::templates::TemplateRenderer;

/// Everything a request handler needs, built once at startup and shared by reference.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub room_repo: Arc<dyn AvailabilityRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub restriction_repo: Arc<dyn RestrictionRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_service: Arc<AuthService>,
    pub mail_queue: MailQueue,
    pub templates: Arc<TemplateRenderer>,
}
