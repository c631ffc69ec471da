pub mod admin;
pub mod auth;
pub mod availability;
pub mod calendar;
pub mod health;
pub mod pages;
pub mod reservation;
