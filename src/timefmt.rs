// tailview — a terminal viewer for remote log panels
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Relative-time rendering for date-flagged display fields.
//!
//! `humanize` turns an ISO-8601-like timestamp into a phrase in the
//! coarsest unit that keeps the magnitude readable: minutes while
//! `|minutes| < 60`, hours while `|hours| < 24`, days otherwise. Applied
//! once per page render; the phrases are not live-updated afterwards.

use std::time::{SystemTime, UNIX_EPOCH};

/// Displayed text optionally flagged with an absolute timestamp attribute.
pub trait DateMarked {
    fn date_attr(&self) -> Option<&str>;
    fn set_display(&mut self, text: String);
}

/// The page-load pass: every item carrying a date attribute has its
/// displayed text replaced with the humanized form. Unflagged items are
/// left alone.
pub fn apply_relative_dates<T: DateMarked>(items: &mut [T]) {
    for item in items {
        let humanized = item.date_attr().map(humanize);
        if let Some(text) = humanized {
            item.set_display(text);
        }
    }
}

/// Render a timestamp relative to now. An unparseable input yields the
/// defined fallback rather than an error.
pub fn humanize(raw: &str) -> String {
    match parse_epoch_seconds(raw) {
        Some(epoch) => relative_phrase(epoch - now_epoch_seconds()),
        None => "Invalid date".to_owned(),
    }
}

fn relative_phrase(delta_seconds: i64) -> String {
    let minutes = round_half_up(delta_seconds, 60);
    if minutes.abs() < 60 {
        return unit_phrase(minutes, "minute");
    }
    let hours = round_half_up(delta_seconds, 60 * 60);
    if hours.abs() < 24 {
        return unit_phrase(hours, "hour");
    }
    unit_phrase(round_half_up(delta_seconds, 24 * 60 * 60), "day")
}

fn unit_phrase(count: i64, unit: &str) -> String {
    if count == 0 {
        return "just now".to_owned();
    }
    let magnitude = count.unsigned_abs();
    let suffix = if magnitude == 1 { "" } else { "s" };
    if count > 0 {
        format!("in {magnitude} {unit}{suffix}")
    } else {
        format!("{magnitude} {unit}{suffix} ago")
    }
}

// Round-half-up on a signed quotient (what JS Math.round does), so the
// bucket boundaries land the same way the original page rendered them.
fn round_half_up(num: i64, den: i64) -> i64 {
    (2 * num + den).div_euclid(2 * den)
}

fn now_epoch_seconds() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
        Err(_) => 0,
    }
}

/// Parse `YYYY-MM-DD[(T| )HH:MM:SS[.frac][Z|±HH:MM]]` into Unix seconds.
/// A bare date is midnight UTC; a missing zone is treated as UTC.
pub(crate) fn parse_epoch_seconds(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (date_raw, time_raw) = match trimmed.split_once('T').or_else(|| trimmed.split_once(' ')) {
        Some(parts) => parts,
        None => (trimmed, ""),
    };
    let (year, month, day) = parse_date(date_raw)?;
    let (seconds_in_day, zone_offset) =
        if time_raw.is_empty() { (0, 0) } else { parse_time_and_zone(time_raw)? };

    let days = civil_days_from_epoch(year, month, day)?;
    days.checked_mul(86_400)?.checked_add(seconds_in_day)?.checked_sub(zone_offset)
}

fn parse_date(raw: &str) -> Option<(i32, u32, u32)> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let year: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[5..7].parse().ok()?;
    let day: u32 = raw[8..10].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

fn parse_time_and_zone(raw: &str) -> Option<(i64, i64)> {
    // The zone designator starts at the first Z/+/- past the HH:MM core.
    let zone_start = raw
        .char_indices()
        .find(|(idx, ch)| *idx >= 5 && matches!(ch, 'Z' | 'z' | '+' | '-'))
        .map(|(idx, _)| idx);
    let (clock_raw, zone_raw) = match zone_start {
        Some(idx) => (&raw[..idx], Some(&raw[idx..])),
        None => (raw, None),
    };

    let clock = clock_raw.split('.').next()?;
    let bytes = clock.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour: i64 = clock[0..2].parse().ok()?;
    let minute: i64 = clock[3..5].parse().ok()?;
    let second: i64 = clock[6..8].parse().ok()?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    let zone_offset = zone_raw.map_or(Some(0), parse_zone_offset_seconds)?;
    Some((hour * 3600 + minute * 60 + second, zone_offset))
}

fn parse_zone_offset_seconds(raw: &str) -> Option<i64> {
    if raw.eq_ignore_ascii_case("z") {
        return Some(0);
    }
    let bytes = raw.as_bytes();
    if bytes.len() != 6 || !(raw.starts_with('+') || raw.starts_with('-')) || bytes[3] != b':' {
        return None;
    }
    let hours: i64 = raw[1..3].parse().ok()?;
    let minutes: i64 = raw[4..6].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    let sign = if raw.starts_with('-') { -1 } else { 1 };
    Some(sign * (hours * 3600 + minutes * 60))
}

// Days from 1970-01-01 to the given civil date (Howard Hinnant's
// days_from_civil, valid across the whole i32 year range).
fn civil_days_from_epoch(year: i32, month: u32, day: u32) -> Option<i64> {
    let month_i32 = i32::try_from(month).ok()?;
    let day_i32 = i32::try_from(day).ok()?;
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = month_i32 + if month > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + day_i32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    Some(i64::from(era) * 146_097 + i64::from(doe) - 719_468)
}
