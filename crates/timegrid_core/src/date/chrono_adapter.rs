//! `chrono` implementation of the date contract.
//!
//! Instants are `NaiveDateTime` wall-clock values: no time zone is applied, so
//! day boundaries are the caller's local midnight.

use super::{DateAdapter, DateParseError};
use crate::unit::Unit;
use chrono::{
    DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Timelike,
};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Reference adapter over `chrono::NaiveDateTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronoAdapter {
    week_starts_on: u8,
    fixed_today: Option<NaiveDateTime>,
}

impl Default for ChronoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChronoAdapter {
    /// Sunday-first adapter reading the system clock.
    pub fn new() -> Self {
        Self {
            week_starts_on: 0,
            fixed_today: None,
        }
    }

    /// Overrides the default week start; values are taken modulo 7.
    pub fn with_week_starts_on(mut self, week_starts_on: u8) -> Self {
        self.week_starts_on = week_starts_on % 7;
        self
    }

    /// Pins `today()` to a fixed instant.
    pub fn with_fixed_today(mut self, today: NaiveDateTime) -> Self {
        self.fixed_today = Some(today);
        self
    }
}

impl DateAdapter for ChronoAdapter {
    type Date = NaiveDateTime;

    fn add(&self, date: NaiveDateTime, amount: i64, unit: Unit) -> NaiveDateTime {
        let shifted = match unit {
            Unit::Hour => Duration::try_hours(amount).and_then(|d| date.checked_add_signed(d)),
            Unit::Day => Duration::try_days(amount).and_then(|d| date.checked_add_signed(d)),
            Unit::Week => amount
                .checked_mul(7)
                .and_then(Duration::try_days)
                .and_then(|d| date.checked_add_signed(d)),
            Unit::Month => add_months(date, amount),
            Unit::Year => amount.checked_mul(12).and_then(|m| add_months(date, m)),
        };
        // Saturate at the representable edge instead of wrapping.
        shifted.unwrap_or(if amount < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
    }

    fn start_of(&self, date: NaiveDateTime, unit: Unit) -> NaiveDateTime {
        let day = date.date();
        match unit {
            Unit::Hour => midnight(day) + Duration::hours(i64::from(date.hour())),
            Unit::Day => midnight(day),
            Unit::Week => self.start_of_week(date, self.week_starts_on),
            Unit::Month => midnight(day - Days::new(u64::from(day.day0()))),
            Unit::Year => midnight(day - Days::new(u64::from(day.ordinal0()))),
        }
    }

    fn start_of_week(&self, date: NaiveDateTime, week_starts_on: u8) -> NaiveDateTime {
        let day = date.date();
        let weekday = day.weekday().num_days_from_sunday();
        let offset = (weekday + 7 - u32::from(week_starts_on % 7)) % 7;
        midnight(day - Days::new(u64::from(offset)))
    }

    fn end_of(&self, date: NaiveDateTime, unit: Unit) -> NaiveDateTime {
        let next = self.add(self.start_of(date, unit), 1, unit);
        next - Duration::nanoseconds(1)
    }

    fn today(&self) -> NaiveDateTime {
        self.fixed_today
            .unwrap_or_else(|| Local::now().naive_local())
    }

    fn from_iso(&self, value: &str) -> Result<NaiveDateTime, DateParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DateParseError::Empty);
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(parsed);
            }
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(midnight(parsed));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|parsed| parsed.naive_local())
            .map_err(|_| DateParseError::Malformed(trimmed.to_string()))
    }

    fn to_iso(&self, date: NaiveDateTime) -> String {
        date.format(ISO_OUTPUT_FORMAT).to_string()
    }

    fn weekday(&self, date: NaiveDateTime) -> u8 {
        // num_days_from_sunday is always 0..=6
        date.weekday().num_days_from_sunday() as u8
    }

    fn month(&self, date: NaiveDateTime) -> u32 {
        date.month()
    }

    fn year(&self, date: NaiveDateTime) -> i32 {
        date.year()
    }

    fn day_of_month(&self, date: NaiveDateTime) -> u32 {
        date.day()
    }

    fn hour(&self, date: NaiveDateTime) -> u32 {
        date.hour()
    }

    fn default_week_starts_on(&self) -> u8 {
        self.week_starts_on
    }
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn add_months(date: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount < 0 {
        date.checked_sub_months(months)
    } else {
        date.checked_add_months(months)
    }
}
