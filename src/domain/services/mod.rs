pub mod auth_service;
pub mod availability;
pub mod calendar;
pub mod forms;
pub mod mail_queue;
pub mod reservation_flow;
