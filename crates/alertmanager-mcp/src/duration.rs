//! Silence duration expressions: `<integer><unit>` with unit one of
//! `h` (hours), `d` (days), `w` (weeks), `m` (30 days) or `y` (365 days).

use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;

use crate::{Error, Result};

lazy_static! {
    static ref DURATION_PATTERN: Regex = Regex::new(r"^(\d+)([hdwmy])$").unwrap();
}

pub fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = || Error::InvalidDuration(input.to_string());

    let caps = DURATION_PATTERN.captures(input).ok_or_else(invalid)?;
    let value: i64 = caps[1].parse().map_err(|_| invalid())?;

    let duration = match &caps[2] {
        "h" => Duration::try_hours(value),
        "d" => Duration::try_days(value),
        "w" => Duration::try_weeks(value),
        "m" => value.checked_mul(30).and_then(Duration::try_days),
        "y" => value.checked_mul(365).and_then(Duration::try_days),
        _ => None,
    };

    duration.ok_or_else(invalid)
}
