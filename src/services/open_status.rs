//! Open/closed status evaluation from a weekly working-hours schedule.
//!
//! The storefront header shows whether the store is currently open and a
//! countdown label to the next transition. This runs on every public page
//! render, so every invalid or missing input maps to a defined output
//! ("closed", 0 minutes) and the evaluation never panics.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::working_hours::{parse_hm, OpenStatus, WorkingDay};

/// Fallback timezone when a store has none configured or the configured
/// identifier does not parse.
pub const DEFAULT_TIMEZONE: &str = "Asia/Amman";

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Copy)]
enum Action {
    Opens,
    Closes,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Opens => "opens",
            Action::Closes => "closes",
        }
    }
}

/// Compute the store's open status for the current instant in `timezone`.
///
/// `timezone` is an IANA identifier resolved through the tzdata database so
/// weekday and time-of-day come out DST-correct; unparseable identifiers
/// fall back to [`DEFAULT_TIMEZONE`]. A `None` or empty schedule means "no
/// hours configured" and yields the conservative "closed" default.
pub fn compute_open_status(schedule: Option<&[WorkingDay]>, timezone: &str) -> OpenStatus {
    compute_open_status_at(schedule, timezone, Utc::now())
}

/// As [`compute_open_status`], at an explicit instant.
pub fn compute_open_status_at(
    schedule: Option<&[WorkingDay]>,
    timezone: &str,
    instant: DateTime<Utc>,
) -> OpenStatus {
    let tz: Tz = timezone
        .parse()
        .or_else(|_| DEFAULT_TIMEZONE.parse())
        .unwrap_or(chrono_tz::UTC);
    let local = instant.with_timezone(&tz);
    let day = local.weekday().num_days_from_sunday() as u8;
    let minutes = local.hour() * 60 + local.minute();
    open_status_at(schedule, day, minutes)
}

/// Deterministic core: evaluate the schedule at (`day_now` 0=Sun..6=Sat,
/// `minutes_now` since local midnight).
pub fn open_status_at(
    schedule: Option<&[WorkingDay]>,
    day_now: u8,
    minutes_now: u32,
) -> OpenStatus {
    let Some(schedule) = schedule.filter(|s| !s.is_empty()) else {
        return closed_status();
    };

    let today = schedule.iter().find(|d| d.day == day_now);
    if let Some(today) = today.filter(|d| !d.closed) {
        let open_m = parse_hm(&today.open);
        let close_m = parse_hm(&today.close);
        // Equal or inverted windows offer no opening today; midnight-spanning
        // hours are unsupported and take the same path.
        if open_m < close_m {
            if minutes_now < open_m {
                let diff = (open_m - minutes_now) as i64;
                return OpenStatus {
                    is_open: false,
                    label: remaining_label(diff, Action::Opens),
                    minutes_until_change: diff as u32,
                };
            }
            if minutes_now < close_m {
                let diff = (close_m - minutes_now) as i64;
                return OpenStatus {
                    is_open: true,
                    label: remaining_label(diff, Action::Closes),
                    minutes_until_change: diff as u32,
                };
            }
        }
    }

    // Today's window has passed or does not apply; scan forward for the
    // first non-closed day, wrapping the weekday index.
    for days_ahead in 1..=7i64 {
        let day = ((day_now as i64 + days_ahead) % 7) as u8;
        if let Some(next) = schedule.iter().find(|d| d.day == day && !d.closed) {
            let diff =
                days_ahead * MINUTES_PER_DAY + parse_hm(&next.open) as i64 - minutes_now as i64;
            return OpenStatus {
                is_open: false,
                label: remaining_label(diff, Action::Opens),
                minutes_until_change: diff.max(0) as u32,
            };
        }
    }

    closed_status()
}

fn closed_status() -> OpenStatus {
    OpenStatus {
        is_open: false,
        label: "closed".to_string(),
        minutes_until_change: 0,
    }
}

/// Format a countdown label for the storefront header.
///
/// Non-positive counts render as "soon" so the UI never shows a zero or
/// negative duration.
fn remaining_label(mins: i64, action: Action) -> String {
    if mins <= 0 {
        return format!("{} soon", action.verb());
    }
    let hours = mins / 60;
    let minutes = mins % 60;
    if hours == 0 {
        format!("{} in {}", action.verb(), plural(minutes, "minute"))
    } else {
        format!(
            "{} in {} {}",
            action.verb(),
            plural(hours, "hour"),
            plural(minutes, "minute")
        )
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
pub(crate) fn label_for(mins: i64, opens: bool) -> String {
    remaining_label(mins, if opens { Action::Opens } else { Action::Closes })
}
