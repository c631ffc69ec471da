use crate::domain::models::room::Room;
use crate::domain::ports::AvailabilityRepository;
use crate::error::AppError;
use chrono::NaiveDate;
use tracing::{debug, info};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Open-interval overlap: a range ending on day D does not collide with one starting on D.
pub fn overlaps(start: NaiveDate, end: NaiveDate, other_start: NaiveDate, other_end: NaiveDate) -> bool {
    start < other_end && end > other_start
}

/// Parses `YYYY-MM-DD` and nothing else (no 1-digit months, no 5-digit years, no padding).
pub fn parse_booking_date(raw: &str) -> Result<NaiveDate, AppError> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::Parse(format!("'{}' is not a YYYY-MM-DD date", raw)));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::Parse(format!("'{}': {}", raw, e)))
}

/// Lenient variant used by the JSON endpoint: anything unparseable becomes 0001-01-01.
pub fn parse_date_or_zero(raw: &str) -> NaiveDate {
    parse_booking_date(raw).unwrap_or_else(|_| zero_date())
}

pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default()
}

pub enum SearchOutcome {
    Rooms(Vec<Room>),
    NoAvailability,
}

pub async fn search_rooms(
    repo: &dyn AvailabilityRepository,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<SearchOutcome, AppError> {
    let rooms = repo.find_available_rooms(start, end).await?;

    for room in &rooms {
        debug!(room_id = room.id, room_name = %room.room_name, "available room");
    }

    if rooms.is_empty() {
        info!("No availability between {} and {}", start, end);
        return Ok(SearchOutcome::NoAvailability);
    }

    info!("{} room(s) available between {} and {}", rooms.len(), start, end);
    Ok(SearchOutcome::Rooms(rooms))
}
