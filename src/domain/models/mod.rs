pub mod mail;
pub mod reservation;
pub mod restriction;
pub mod room;
pub mod user;
pub mod workflow;
