use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tokio::sync::mpsc::Receiver;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::mail::MailData;
use crate::domain::ports::{
    AvailabilityRepository, ReservationRepository, RestrictionRepository, UserRepository,
};
use crate::domain::services::{auth_service::AuthService, mail_queue::MailQueue};
use crate::infra::templates::TemplateRenderer;
use crate::infra::repositories::{
    postgres_room_repo::PostgresRoomRepo, postgres_reservation_repo::PostgresReservationRepo,
    postgres_restriction_repo::PostgresRestrictionRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_room_repo::SqliteRoomRepo, sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_restriction_repo::SqliteRestrictionRepo, sqlite_user_repo::SqliteUserRepo,
};

pub struct Repositories {
    pub rooms: Arc<dyn AvailabilityRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub restrictions: Arc<dyn RestrictionRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            rooms: Arc::new(PostgresRoomRepo::new(pool.clone())),
            reservations: Arc::new(PostgresReservationRepo::new(pool.clone())),
            restrictions: Arc::new(PostgresRestrictionRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        }
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        Self {
            rooms: Arc::new(SqliteRoomRepo::new(pool.clone())),
            reservations: Arc::new(SqliteReservationRepo::new(pool.clone())),
            restrictions: Arc::new(SqliteRestrictionRepo::new(pool.clone())),
            users: Arc::new(SqliteUserRepo::new(pool)),
        }
    }
}

/// Wires repositories, templates and the mail queue into an [`AppState`].
/// The returned receiver belongs to the mail worker.
pub fn assemble_state(
    config: &Config,
    repos: Repositories,
    templates: TemplateRenderer,
) -> (AppState, Receiver<MailData>) {
    let (mail_queue, mail_rx) = MailQueue::bounded(config.mail_queue_capacity);
    let auth_service = Arc::new(AuthService::new(repos.users.clone()));

    let state = AppState {
        config: config.clone(),
        room_repo: repos.rooms,
        reservation_repo: repos.reservations,
        restriction_repo: repos.restrictions,
        user_repo: repos.users,
        auth_service,
        mail_queue,
        templates: Arc::new(templates),
    };

    (state, mail_rx)
}

pub async fn bootstrap_state(config: &Config) -> (AppState, Receiver<MailData>) {
    let database_url = &config.database_url;

    let templates = TemplateRenderer::new(config.use_template_cache)
        .expect("Failed to load templates");

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        Repositories::postgres(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(3))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        Repositories::sqlite(pool)
    };

    let (state, mail_rx) = assemble_state(config, repos, templates);

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        state.auth_service.ensure_admin(email, password).await
            .expect("Failed to seed admin user");
    }

    (state, mail_rx)
}

pub async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
