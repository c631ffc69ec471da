use serde::Deserialize;

// Missing fields deserialize to empty strings so bad input reaches the
// handlers' own validation instead of a generic form rejection.

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SearchForm {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AvailabilityCheckForm {
    pub start_date: String,
    pub end_date: String,
    pub room_id: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BookRoomQuery {
    pub id: String,
    pub s: String,
    pub e: String,
}

/// `?y=&m=` on calendar and admin links.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct MonthQuery {
    pub y: String,
    pub m: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateReservationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub year: String,
    pub month: String,
}
