//! Weekly working-hours schedule types.
//!
//! A schedule is an immutable snapshot read from the store record and handed
//! to the open-status evaluator on every storefront render. Days absent from
//! the schedule are treated as closed; the evaluator never mutates it.

use serde::{Deserialize, Serialize};

/// One weekday's opening window. `day` uses 0=Sunday..6=Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDay {
    pub day: u8,
    /// Opening time as "HH:MM" (24-hour).
    #[serde(default)]
    pub open: String,
    /// Closing time as "HH:MM" (24-hour).
    #[serde(default)]
    pub close: String,
    /// A closed day is skipped even if open/close are present.
    #[serde(default)]
    pub closed: bool,
}

/// At most 7 entries keyed by weekday index; order is irrelevant.
pub type WeeklySchedule = Vec<WorkingDay>;

/// Derived open/closed state for the storefront header. Recomputed on every
/// call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenStatus {
    pub is_open: bool,
    /// Display string describing time until the next transition.
    pub label: String,
    pub minutes_until_change: u32,
}

/// Parse an "HH:MM" time-of-day into minutes since midnight.
///
/// Malformed components parse to 0 rather than erroring; invalid input must
/// degrade gracefully because this runs on public page renders.
pub fn parse_hm(hm: &str) -> u32 {
    let mut parts = hm.splitn(2, ':');
    let h: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    let m: u32 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    h * 60 + m
}

/// Default schedule for newly created stores: every day 10:00-23:00.
pub fn default_working_hours() -> WeeklySchedule {
    (0..7)
        .map(|day| WorkingDay {
            day,
            open: "10:00".to_string(),
            close: "23:00".to_string(),
            closed: false,
        })
        .collect()
}
