use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub in_production: bool,
    pub use_template_cache: bool,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub mail_from: String,
    pub mail_queue_capacity: usize,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| postgres_url_from_parts()),
            port: env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().expect("PORT must be a number"),
            in_production: flag("IN_PRODUCTION", true),
            use_template_cache: flag("USE_TEMPLATE_CACHE", true),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| "me@here.com".to_string()),
            mail_queue_capacity: env::var("MAIL_QUEUE_CAPACITY").unwrap_or_else(|_| "100".to_string()).parse().expect("MAIL_QUEUE_CAPACITY must be a number"),
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        }
    }
}

// Same parameters the site always took: host, port, name, user, password, sslmode.
fn postgres_url_from_parts() -> String {
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let name = env::var("DB_NAME").expect("DATABASE_URL or DB_NAME must be set");
    let user = env::var("DB_USER").expect("DATABASE_URL or DB_USER must be set");
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let sslmode = env::var("DB_SSLMODE").unwrap_or_else(|_| "disable".to_string());

    format!("postgres://{}:{}@{}:{}/{}?sslmode={}", user, password, host, port, name, sslmode)
}

fn flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
