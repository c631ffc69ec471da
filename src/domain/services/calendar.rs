//! Per-room month grids for the admin calendar and the block reconciliation
//! applied when the calendar form is saved.

use crate::domain::models::{restriction::RoomRestriction, room::Room};
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Day keys as they appear in form field names, e.g. `2024-03-5`.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%-d";

pub type DayMap = BTreeMap<String, i64>;

pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

pub fn blocked_session_key(room_id: i64) -> String {
    format!("blocked_{}", room_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self { first, last })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month()).unwrap_or(Self { first: date, last: date })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take_while(move |d| *d <= self.last)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last.day()
    }

    pub fn previous(&self) -> Self {
        self.first.checked_sub_months(Months::new(1)).map(Self::containing).unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.first.checked_add_months(Months::new(1)).map(Self::containing).unwrap_or(*self)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoomMonth {
    pub reservation_map: DayMap,
    pub blocked: DayMap,
}

/// Fills both maps for every day of the month. Reservation-caused restrictions cover
/// their whole inclusive span, manual blocks only their start day.
pub fn build_room_month(month: &Month, restrictions: &[RoomRestriction]) -> RoomMonth {
    let mut grid = RoomMonth::default();
    for day in month.days() {
        grid.reservation_map.insert(day_key(day), 0);
        grid.blocked.insert(day_key(day), 0);
    }

    for r in restrictions {
        if r.is_reservation() {
            let reservation_id = r.reservation_id.unwrap_or_default();
            let from = r.start_date.max(month.first);
            let to = r.end_date.min(month.last);
            for day in from.iter_days().take_while(|d| *d <= to) {
                grid.reservation_map.insert(day_key(day), reservation_id);
            }
        } else if r.start_date >= month.first && r.start_date <= month.last {
            grid.blocked.insert(day_key(r.start_date), r.id);
        }
    }

    grid
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub key: String,
    pub reservation_id: i64,
    pub block_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarRoom {
    pub room: Room,
    pub days: Vec<CalendarDay>,
}

pub fn calendar_room(room: Room, month: &Month, grid: &RoomMonth) -> CalendarRoom {
    let days = month
        .days()
        .map(|date| {
            let key = day_key(date);
            CalendarDay {
                day: date.day(),
                reservation_id: grid.reservation_map.get(&key).copied().unwrap_or(0),
                block_id: grid.blocked.get(&key).copied().unwrap_or(0),
                key,
            }
        })
        .collect();
    CalendarRoom { room, days }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BlockChanges {
    pub delete: Vec<i64>,
    pub add: Vec<(i64, NaiveDate)>,
}

/// Blocks present in the rendered snapshot but not kept in the submitted form are
/// deleted; every `add_block_{room}_{day}` field becomes a new block.
pub fn reconcile_blocks(
    snapshots: &HashMap<i64, DayMap>,
    submitted: &[(String, String)],
) -> BlockChanges {
    let fields: std::collections::HashSet<&str> = submitted.iter().map(|(k, _)| k.as_str()).collect();
    let mut changes = BlockChanges::default();

    let mut room_ids: Vec<&i64> = snapshots.keys().collect();
    room_ids.sort();
    for room_id in room_ids {
        for (day, block_id) in &snapshots[room_id] {
            if *block_id > 0 && !fields.contains(format!("remove_block_{}_{}", room_id, day).as_str()) {
                changes.delete.push(*block_id);
            }
        }
    }

    for (name, _) in submitted {
        if let Some(added) = parse_add_block(name) {
            changes.add.push(added);
        }
    }

    changes
}

fn parse_add_block(name: &str) -> Option<(i64, NaiveDate)> {
    let rest = name.strip_prefix("add_block_")?;
    let (room, day) = rest.split_once('_')?;
    let room_id = room.parse().ok()?;
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    Some((room_id, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn restriction(id: i64, start: &str, end: &str, reservation_id: Option<i64>) -> RoomRestriction {
        RoomRestriction {
            id,
            start_date: d(start),
            end_date: d(end),
            room_id: 1,
            reservation_id,
            restriction_id: if reservation_id.is_some() { 1 } else { 2 },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn month_bounds() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.last, d("2024-02-29"));
        assert_eq!(feb.days().count(), 29);
        assert_eq!(feb.previous().first, d("2024-01-01"));
        assert_eq!(Month::new(2024, 12).unwrap().next().first, d("2025-01-01"));
        assert!(Month::new(2024, 13).is_none());
    }

    #[test]
    fn day_keys_are_unpadded() {
        assert_eq!(day_key(d("2024-03-05")), "2024-03-5");
        assert_eq!(day_key(d("2024-03-15")), "2024-03-15");
    }

    #[test]
    fn reservations_fill_span_and_blocks_fill_start_day() {
        let month = Month::new(2024, 3).unwrap();
        let grid = build_room_month(&month, &[
            restriction(10, "2024-02-28", "2024-03-02", Some(7)),
            restriction(11, "2024-03-20", "2024-03-20", None),
        ]);

        assert_eq!(grid.reservation_map.len(), 31);
        assert_eq!(grid.reservation_map["2024-03-1"], 7);
        assert_eq!(grid.reservation_map["2024-03-2"], 7);
        assert_eq!(grid.reservation_map["2024-03-3"], 0);
        assert!(!grid.reservation_map.contains_key("2024-02-28"));
        assert_eq!(grid.blocked["2024-03-20"], 11);
        assert_eq!(grid.blocked["2024-03-21"], 0);
    }

    #[test]
    fn reconcile_deletes_unkept_and_adds_new() {
        let mut snapshot = DayMap::new();
        snapshot.insert("2024-03-1".into(), 0);
        snapshot.insert("2024-03-2".into(), 41);
        snapshot.insert("2024-03-3".into(), 42);
        let snapshots = HashMap::from([(1, snapshot)]);

        let submitted = vec![
            ("y".to_string(), "2024".to_string()),
            ("remove_block_1_2024-03-3".to_string(), "42".to_string()),
            ("add_block_2_2024-03-9".to_string(), "1".to_string()),
        ];

        let changes = reconcile_blocks(&snapshots, &submitted);
        assert_eq!(changes.delete, vec![41]);
        assert_eq!(changes.add, vec![(2, d("2024-03-09"))]);
    }

    #[test]
    fn malformed_add_fields_are_ignored() {
        let submitted = vec![("add_block_x_2024-03-1".to_string(), "1".to_string())];
        assert_eq!(reconcile_blocks(&HashMap::new(), &submitted), BlockChanges::default());
    }
}
