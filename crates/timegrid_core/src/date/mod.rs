//! Date-operations contract.
//!
//! # Responsibility
//! - Define the only surface through which the engine touches dates.
//! - Ship one reference adapter ([`ChronoAdapter`]) over `chrono`.
//!
//! # Invariants
//! - Core modules never name a concrete date type; they go through
//!   `DateAdapter::Date`.
//! - `weekday` is 0 (Sunday) ..= 6 (Saturday); `month` is 1 ..= 12.

mod chrono_adapter;

pub use chrono_adapter::ChronoAdapter;

use crate::unit::Unit;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// External date-library adapter.
///
/// Implementations must be cheap to clone; grids and capabilities keep their
/// own copy.
pub trait DateAdapter: Clone + Debug + Send + Sync + 'static {
    /// Instant type of the backing library.
    type Date: Copy + Ord + Debug + Send + Sync + 'static;

    /// Adds `amount` units (negative moves back). Month and year arithmetic is
    /// calendar arithmetic, clamping the day to the target month's length.
    fn add(&self, date: Self::Date, amount: i64, unit: Unit) -> Self::Date;

    /// First instant of the unit containing `date`. `Unit::Week` uses
    /// [`DateAdapter::default_week_starts_on`].
    fn start_of(&self, date: Self::Date, unit: Unit) -> Self::Date;

    /// First instant of the week containing `date`.
    fn start_of_week(&self, date: Self::Date, week_starts_on: u8) -> Self::Date;

    /// Last representable instant of the unit containing `date`.
    fn end_of(&self, date: Self::Date, unit: Unit) -> Self::Date;

    fn is_same(&self, a: Self::Date, b: Self::Date, unit: Unit) -> bool {
        self.start_of(a, unit) == self.start_of(b, unit)
    }

    fn is_before(&self, a: Self::Date, b: Self::Date) -> bool {
        a < b
    }

    fn is_after(&self, a: Self::Date, b: Self::Date) -> bool {
        a > b
    }

    /// Current instant.
    fn today(&self) -> Self::Date;

    fn from_iso(&self, value: &str) -> Result<Self::Date, DateParseError>;

    fn to_iso(&self, date: Self::Date) -> String;

    fn weekday(&self, date: Self::Date) -> u8;

    fn month(&self, date: Self::Date) -> u32;

    fn year(&self, date: Self::Date) -> i32;

    fn day_of_month(&self, date: Self::Date) -> u32;

    fn hour(&self, date: Self::Date) -> u32;

    fn default_week_starts_on(&self) -> u8;
}

/// Failure to read a date from its ISO form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    Empty,
    Malformed(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date value must not be empty"),
            Self::Malformed(value) => write!(f, "date value is not ISO-8601: {value}"),
        }
    }
}

impl Error for DateParseError {}
