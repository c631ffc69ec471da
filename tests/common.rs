use room_booking::{
    api::router::create_router,
    background::start_mail_worker,
    config::Config,
    domain::models::{mail::MailData, reservation::{NewReservation, Reservation}},
    domain::ports::EmailService,
    error::AppError,
    infra::factory::{assemble_state, run_sqlite_migrations, Repositories},
    infra::templates::TemplateRenderer,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@here.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";

/// Keeps every mail the worker hands over instead of calling the mail service.
#[derive(Clone, Default)]
pub struct RecordingEmailService {
    pub sent: Arc<Mutex<Vec<MailData>>>,
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(&self, mail: &MailData) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: RecordingEmailService,
    cookie: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            in_production: false,
            use_template_cache: true,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            mail_from: "me@here.com".to_string(),
            mail_queue_capacity: 10,
            admin_email: None,
            admin_password: None,
        };

        let templates = TemplateRenderer::new(true).expect("Embedded templates must parse");
        let (state, mail_rx) = assemble_state(&config, Repositories::sqlite(pool.clone()), templates);
        let state = Arc::new(state);

        let mailer = RecordingEmailService::default();
        tokio::spawn(start_mail_worker(mail_rx, Arc::new(mailer.clone())));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
            cookie: Mutex::new(None),
        }
    }

    /// Sends a request as the same browser: the session cookie from earlier
    /// responses is attached and replaced whenever the server issues a new one.
    pub async fn send(&self, builder: axum::http::request::Builder, body: Body) -> Response<Body> {
        let builder = match self.cookie.lock().unwrap().clone() {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap().trim().to_string();
            if !pair.starts_with("id=") {
                continue;
            }
            if raw.contains("Max-Age=0") || pair == "id=" {
                *self.cookie.lock().unwrap() = None;
            } else {
                *self.cookie.lock().unwrap() = Some(pair);
            }
        }

        response
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().method("GET").uri(uri), Body::empty()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
            Body::from(form.to_string()),
        ).await
    }

    /// Drops the session cookie, as if a different browser made the next request.
    pub fn forget_session(&self) {
        *self.cookie.lock().unwrap() = None;
    }

    pub async fn login_admin(&self) {
        self.state.auth_service.ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let res = self.post_form(
            "/user/login",
            &format!("email={}&password={}", ADMIN_EMAIL, ADMIN_PASSWORD),
        ).await;
        assert_eq!(location(&res), "/");
    }

    pub async fn reserve(&self, room_id: i64, start: &str, end: &str) -> Reservation {
        self.state.reservation_repo.create_with_restriction(&NewReservation {
            first_name: "Existing Guest".to_string(),
            last_name: "Booker".to_string(),
            email: "existing@example.com".to_string(),
            phone: "555".to_string(),
            start_date: date(start),
            end_date: date(end),
            room_id,
            room_name: String::new(),
        }).await.unwrap()
    }

    pub async fn block(&self, room_id: i64, day: &str) -> i64 {
        self.state.restriction_repo.insert_block(room_id, date(day)).await.unwrap();
        let (id,): (i64,) = sqlx::query_as(
            "SELECT id FROM room_restriction WHERE room_id = ? AND start_date = ? AND reservation_id IS NULL",
        )
            .bind(room_id)
            .bind(day)
            .fetch_one(&self.pool)
            .await
            .unwrap();
        id
    }

    /// Waits for the mail worker to drain the queue.
    pub async fn sent_mail(&self, expected: usize) -> Vec<MailData> {
        for _ in 0..50 {
            if self.mailer.sent.lock().unwrap().len() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.mailer.sent.lock().unwrap().clone()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> String {
    response.headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
