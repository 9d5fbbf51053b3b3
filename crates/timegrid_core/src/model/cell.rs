//! Grid cell model.
//!
//! # Responsibility
//! - Define the atomic slot of a grid and its stable key.
//!
//! # Invariants
//! - Keys are zero-padded and fixed-width per unit (`YYYY`, `YYYY-MM`,
//!   `YYYY-MM-DD`, `YYYY-MM-DDTHH`), so byte order equals chronological order
//!   for keys of the same unit. Years outside `0..=9999` cannot satisfy this
//!   and are rejected with [`KeyError::YearOutOfRange`].
//! - Derived calendar fields are computed once, at construction.

use crate::date::DateAdapter;
use crate::unit::Unit;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_KEY_YEAR: i32 = 0;
const MAX_KEY_YEAR: i32 = 9999;

/// Chronologically sortable cell identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CellKey(String);

impl CellKey {
    /// Formats the key of the `unit` cell starting at the given calendar fields.
    ///
    /// `Unit::Week` cells are keyed by their first day.
    pub fn new(unit: Unit, year: i32, month: u32, day: u32, hour: u32) -> Result<Self, KeyError> {
        if !(MIN_KEY_YEAR..=MAX_KEY_YEAR).contains(&year) {
            return Err(KeyError::YearOutOfRange(year));
        }
        let key = match unit {
            Unit::Year => format!("{year:04}"),
            Unit::Month => format!("{year:04}-{month:02}"),
            Unit::Week | Unit::Day => format!("{year:04}-{month:02}-{day:02}"),
            Unit::Hour => format!("{year:04}-{month:02}-{day:02}T{hour:02}"),
        };
        Ok(Self(key))
    }

    /// Key of the `unit` cell starting at `date`; `date` must already be
    /// normalized for `unit`.
    pub fn from_date<A: DateAdapter>(
        adapter: &A,
        unit: Unit,
        date: A::Date,
    ) -> Result<Self, KeyError> {
        Self::new(
            unit,
            adapter.year(date),
            adapter.month(date),
            adapter.day_of_month(date),
            adapter.hour(date),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CellKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CellKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CellKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CellKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Key generation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    YearOutOfRange(i32),
}

impl Display for KeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange(year) => write!(
                f,
                "year {year} cannot be keyed; sortable keys require {MIN_KEY_YEAR}..={MAX_KEY_YEAR}"
            ),
        }
    }
}

impl Error for KeyError {}

/// One discrete unit-of-time slot with its bound data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell<T, D> {
    pub key: CellKey,
    /// Unit-normalized first instant of the cell.
    pub date: D,
    pub data: Vec<T>,
    pub is_today: bool,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
    pub day_of_month: u32,
    /// 1 ..= 12.
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    /// Synthetic cell added by week padding.
    pub is_padding: bool,
}

impl<T, D: Copy> Cell<T, D> {
    pub(crate) fn new<A>(
        adapter: &A,
        unit: Unit,
        key: CellKey,
        date: D,
        today: D,
        data: Vec<T>,
    ) -> Self
    where
        A: DateAdapter<Date = D>,
    {
        Self {
            key,
            date,
            data,
            is_today: unit.is_today(adapter, date, today),
            weekday: adapter.weekday(date),
            day_of_month: adapter.day_of_month(date),
            month: adapter.month(date),
            year: adapter.year(date),
            hour: adapter.hour(date),
            is_padding: false,
        }
    }

    /// Data-free identity of this cell.
    pub fn to_ref(&self) -> CellRef<D> {
        CellRef {
            key: self.key.clone(),
            date: self.date,
        }
    }
}

/// Key and date of a cell, without its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellRef<D> {
    pub key: CellKey,
    pub date: D,
}
