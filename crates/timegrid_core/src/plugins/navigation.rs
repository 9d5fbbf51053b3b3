//! Cursor navigation capability.
//!
//! # Responsibility
//! - Derive the active display range from a cursor instant.
//! - Step the cursor forward/back by one navigation unit.
//!
//! # Invariants
//! - Every transition is total and returns a fresh `NavigationState`; the
//!   capability itself never changes after composition.
//! - Month steps are calendar-month steps from the first of the cursor's
//!   month, never fixed day counts. As a consequence month navigation is not
//!   invertible at month ends: Jan 31 -> next -> Feb 1 -> prev -> Jan 1.
//! - Year steps keep the day of year, except Feb 29 which clamps to Feb 28.

use crate::date::DateAdapter;
use crate::extension::{Extension, ExtensionError, Plugin};
use crate::model::grid::TimeGrid;
use crate::model::range::Range;
use crate::unit::Unit;
use log::debug;
use serde::Serialize;

/// Navigation state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState<D> {
    pub cursor: D,
    pub range_start: D,
    pub range_end: D,
}

impl<D: Copy + Ord> NavigationState<D> {
    /// Range to rebuild the grid with after a transition.
    pub fn range(&self) -> Range<D> {
        Range::new(self.range_start, self.range_end)
    }
}

/// Navigation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOptions<D> {
    pub unit: Unit,
    /// Years per step for `Unit::Year`; ignored otherwise.
    pub year_step: u32,
    /// Initial cursor; `None` starts at the adapter's `today()`.
    pub cursor: Option<D>,
}

impl<D> NavigationOptions<D> {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            year_step: 1,
            cursor: None,
        }
    }

    pub fn with_year_step(mut self, year_step: u32) -> Self {
        self.year_step = year_step;
        self
    }

    pub fn with_cursor(mut self, cursor: D) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

/// Navigation operations attached to a grid under `navigation`.
#[derive(Debug, Clone)]
pub struct Navigation<A: DateAdapter> {
    adapter: A,
    unit: Unit,
    year_step: u32,
    week_starts_on: u8,
    initial: NavigationState<A::Date>,
}

impl<A: DateAdapter> Extension for Navigation<A> {
    const NAME: &'static str = "navigation";
}

impl<A: DateAdapter> Navigation<A> {
    /// Creates navigation ops; the cursor starts at `options.cursor` or today.
    pub fn new(adapter: A, options: NavigationOptions<A::Date>, week_starts_on: u8) -> Self {
        let cursor = options.cursor.unwrap_or_else(|| adapter.today());
        let mut navigation = Self {
            adapter,
            unit: options.unit,
            year_step: options.year_step.max(1),
            week_starts_on: week_starts_on % 7,
            initial: NavigationState {
                cursor,
                range_start: cursor,
                range_end: cursor,
            },
        };
        navigation.initial = navigation.state_at(cursor);
        navigation
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// State at composition time.
    pub fn initial_state(&self) -> NavigationState<A::Date> {
        self.initial
    }

    pub fn go_next(&self, state: &NavigationState<A::Date>) -> NavigationState<A::Date> {
        self.state_at(self.step(state.cursor, 1))
    }

    pub fn go_prev(&self, state: &NavigationState<A::Date>) -> NavigationState<A::Date> {
        self.state_at(self.step(state.cursor, -1))
    }

    pub fn go_today(&self) -> NavigationState<A::Date> {
        self.state_at(self.adapter.today())
    }

    pub fn go_to(&self, date: A::Date) -> NavigationState<A::Date> {
        self.state_at(date)
    }

    fn step(&self, cursor: A::Date, direction: i64) -> A::Date {
        let adapter = &self.adapter;
        match self.unit {
            Unit::Hour => adapter.add(cursor, direction, Unit::Hour),
            Unit::Day => adapter.add(cursor, direction, Unit::Day),
            Unit::Week => adapter.add(cursor, 7 * direction, Unit::Day),
            Unit::Month => adapter.add(adapter.start_of(cursor, Unit::Month), direction, Unit::Month),
            Unit::Year => adapter.add(cursor, i64::from(self.year_step) * direction, Unit::Year),
        }
    }

    fn state_at(&self, cursor: A::Date) -> NavigationState<A::Date> {
        let adapter = &self.adapter;
        let (range_start, range_end) = match self.unit {
            Unit::Week => {
                let start = adapter.start_of_week(cursor, self.week_starts_on);
                let last_day = adapter.add(start, 6, Unit::Day);
                (start, adapter.end_of(last_day, Unit::Day))
            }
            unit => (adapter.start_of(cursor, unit), adapter.end_of(cursor, unit)),
        };
        NavigationState {
            cursor,
            range_start,
            range_end,
        }
    }
}

/// Composes [`Navigation`] onto a grid.
#[derive(Debug, Clone)]
pub struct NavigationPlugin<D> {
    options: NavigationOptions<D>,
}

impl<D> NavigationPlugin<D> {
    pub fn new(options: NavigationOptions<D>) -> Self {
        Self { options }
    }
}

impl<T, A: DateAdapter> Plugin<T, A> for NavigationPlugin<A::Date> {
    fn name(&self) -> &'static str {
        Navigation::<A>::NAME
    }

    fn extend(&self, grid: TimeGrid<T, A>) -> Result<TimeGrid<T, A>, ExtensionError> {
        let navigation = Navigation::new(grid.adapter().clone(), self.options, grid.week_starts_on());
        debug!(
            "event=navigation_attach module=navigation status=ok unit={} year_step={}",
            navigation.unit, navigation.year_step
        );
        Ok(grid.with_extension(navigation))
    }
}
