pub mod admin;
pub mod web_session;
