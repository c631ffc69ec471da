use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{admin, auth, availability, calendar, health, pages, reservation};
use tower_http::{
    classify::ServerErrorsFailureClass,
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub const STATIC_DIR: &str = "static";

pub fn create_router(state: Arc<AppState>) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(24)))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_secure(state.config.in_production);

    Router::new()
        .route("/health", get(health::health_check))

        // Pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/general", get(pages::generals_quarters))
        .route("/suite", get(pages::majors_suite))
        .route("/contact", get(pages::contact))

        // Availability
        .route("/search-availability", get(availability::search_page).post(availability::search))
        .route("/search-availability-json", post(availability::check_room))

        // Reservation workflow
        .route("/choose-room/{id}", get(reservation::choose_room))
        .route("/book-room", get(reservation::book_room))
        .route("/make-reservation", get(reservation::reservation_form).post(reservation::submit_reservation))
        .route("/reservation-summary", get(reservation::summary))

        // Auth
        .route("/user/login", get(auth::login_page).post(auth::login))
        .route("/user/logout", get(auth::logout))

        // Admin
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/reservation-new", get(admin::new_reservations))
        .route("/admin/reservation-all", get(admin::all_reservations))
        .route("/admin/reservation-calendar", get(calendar::show_calendar).post(calendar::save_calendar))
        .route("/admin/reservations/{src}/{id}/show", get(admin::show_reservation))
        .route("/admin/reservations/{src}/{id}", post(admin::update_reservation))
        .route("/admin/process-reservation/{src}/{id}/do", get(admin::process_reservation))
        .route("/admin/delete-reservation/{src}/{id}/do", get(admin::delete_reservation))

        .nest_service("/static", ServeDir::new(STATIC_DIR))

        .layer(sessions)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
