//! Cell unit registry.
//!
//! # Responsibility
//! - Define the granularities a grid can partition time into.
//! - Encode per-unit normalize/advance/compare behavior as one data table.
//!
//! # Invariants
//! - `next(normalize(d))` is strictly later than `normalize(d)` under the
//!   unit's own comparison, so generation loops always terminate.
//! - The grid builder never branches on a unit; it only reads `UnitRule`.

use crate::date::DateAdapter;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Granularity of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Behavior row for one unit.
///
/// `normalize_to` is the adapter unit a date is snapped to, `step` is the
/// amount and adapter unit added per cell, and `compare_at` is the
/// granularity `is_after` ignores precision below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRule {
    pub unit: Unit,
    pub normalize_to: Unit,
    pub step: (i64, Unit),
    pub compare_at: Unit,
}

const UNIT_RULES: [UnitRule; 5] = [
    UnitRule {
        unit: Unit::Hour,
        normalize_to: Unit::Hour,
        step: (1, Unit::Hour),
        compare_at: Unit::Hour,
    },
    UnitRule {
        unit: Unit::Day,
        normalize_to: Unit::Day,
        step: (1, Unit::Day),
        compare_at: Unit::Day,
    },
    // Week cells keep their own weekday; only the step is a week.
    UnitRule {
        unit: Unit::Week,
        normalize_to: Unit::Day,
        step: (7, Unit::Day),
        compare_at: Unit::Day,
    },
    UnitRule {
        unit: Unit::Month,
        normalize_to: Unit::Month,
        step: (1, Unit::Month),
        compare_at: Unit::Month,
    },
    UnitRule {
        unit: Unit::Year,
        normalize_to: Unit::Year,
        step: (1, Unit::Year),
        compare_at: Unit::Year,
    },
];

/// Manifest-style string ids accepted by [`parse_unit`].
pub const UNIT_HOUR: &str = "hour";
pub const UNIT_DAY: &str = "day";
pub const UNIT_WEEK: &str = "week";
pub const UNIT_MONTH: &str = "month";
pub const UNIT_YEAR: &str = "year";

impl Unit {
    /// All units, finest first.
    pub const ALL: [Unit; 5] = [Unit::Hour, Unit::Day, Unit::Week, Unit::Month, Unit::Year];

    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => UNIT_HOUR,
            Self::Day => UNIT_DAY,
            Self::Week => UNIT_WEEK,
            Self::Month => UNIT_MONTH,
            Self::Year => UNIT_YEAR,
        }
    }

    /// Registry row for this unit.
    pub fn rule(self) -> &'static UnitRule {
        &UNIT_RULES[self as usize]
    }

    /// Snaps `date` to the start of the cell containing it.
    pub fn normalize<A: DateAdapter>(self, adapter: &A, date: A::Date) -> A::Date {
        adapter.start_of(date, self.rule().normalize_to)
    }

    /// Advances exactly one cell.
    pub fn next<A: DateAdapter>(self, adapter: &A, date: A::Date) -> A::Date {
        let (amount, unit) = self.rule().step;
        adapter.add(date, amount, unit)
    }

    /// Moves back exactly one cell.
    pub fn prev<A: DateAdapter>(self, adapter: &A, date: A::Date) -> A::Date {
        let (amount, unit) = self.rule().step;
        adapter.add(date, -amount, unit)
    }

    /// Unit-aware "later than", ignoring sub-unit precision.
    pub fn is_after<A: DateAdapter>(self, adapter: &A, a: A::Date, b: A::Date) -> bool {
        let granularity = self.rule().compare_at;
        adapter.is_after(
            adapter.start_of(a, granularity),
            adapter.start_of(b, granularity),
        )
    }

    /// Start of the cell containing `date` in a grid whose cells are aligned
    /// on `anchor`, usually the grid's first cell. Only week cells depend on
    /// the anchor; without one a week cell starts on the date's own day.
    pub fn cell_start<A: DateAdapter>(
        self,
        adapter: &A,
        date: A::Date,
        anchor: Option<A::Date>,
    ) -> A::Date {
        let normalized = self.normalize(adapter, date);
        match (self, anchor) {
            (Self::Week, Some(anchor)) => {
                let offset = (i64::from(adapter.weekday(normalized))
                    - i64::from(adapter.weekday(anchor)))
                .rem_euclid(7);
                adapter.add(normalized, -offset, Unit::Day)
            }
            _ => normalized,
        }
    }

    /// Whether `today` falls in the cell starting at `cell_start`.
    /// Hour cells count as today for the whole day.
    pub(crate) fn is_today<A: DateAdapter>(
        self,
        adapter: &A,
        cell_start: A::Date,
        today: A::Date,
    ) -> bool {
        match self {
            Self::Hour => adapter.is_same(cell_start, today, Unit::Day),
            _ => {
                !adapter.is_before(today, cell_start)
                    && adapter.is_before(today, self.next(adapter, cell_start))
            }
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one unit from its string id.
pub fn parse_unit(value: &str) -> Result<Unit, UnitParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(UnitParseError::Empty);
    }
    match normalized {
        UNIT_HOUR => Ok(Unit::Hour),
        UNIT_DAY => Ok(Unit::Day),
        UNIT_WEEK => Ok(Unit::Week),
        UNIT_MONTH => Ok(Unit::Month),
        UNIT_YEAR => Ok(Unit::Year),
        other => Err(UnitParseError::Unsupported(other.to_string())),
    }
}

/// Unit parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitParseError {
    Empty,
    Unsupported(String),
}

impl Display for UnitParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "cell unit must not be empty"),
            Self::Unsupported(value) => write!(
                f,
                "cell unit is unsupported: {value} (expected hour|day|week|month|year)"
            ),
        }
    }
}

impl Error for UnitParseError {}
