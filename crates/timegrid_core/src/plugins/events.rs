//! Event overlap capability.
//!
//! # Responsibility
//! - Bind events with their own `[start, end)` intervals onto grid cells.
//! - Answer per-cell, per-date and in-view overlap queries.
//!
//! # Invariants
//! - Intervals are half-open: an event ending exactly at a cell's start does
//!   not overlap that cell. A zero-length event belongs to the cell containing
//!   its instant.
//! - `end < start` is rejected when binding, never at query time.
//! - Queries are read-only and return events in bind order.

use crate::date::DateAdapter;
use crate::extension::{Extension, ExtensionError, Plugin};
use crate::model::cell::Cell;
use crate::model::grid::TimeGrid;
use crate::unit::Unit;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Anything with a half-open `[start, end)` time interval.
///
/// An event with `start == end` is not empty: it overlaps the one cell whose
/// span contains that instant.
pub trait TimedEvent<D> {
    fn start(&self) -> D;
    fn end(&self) -> D;
}

impl<D: Copy> TimedEvent<D> for (D, D) {
    fn start(&self) -> D {
        self.0
    }

    fn end(&self) -> D {
        self.1
    }
}

/// Event operations attached to a grid under `events`.
#[derive(Debug, Clone)]
pub struct Events<E, A: DateAdapter> {
    adapter: A,
    unit: Unit,
    /// First cell date of the bound grid; aligns week cells.
    anchor: Option<A::Date>,
    events: Vec<E>,
    view: Option<(A::Date, A::Date)>,
}

impl<E, A> Extension for Events<E, A>
where
    E: Send + Sync + 'static,
    A: DateAdapter,
{
    const NAME: &'static str = "events";
}

impl<E, A> Events<E, A>
where
    E: TimedEvent<A::Date>,
    A: DateAdapter,
{
    /// Validates and binds `events` onto `grid`'s cells.
    ///
    /// # Errors
    /// - `InvalidInterval` for the first event whose end precedes its start.
    pub fn bind<T>(grid: &TimeGrid<T, A>, events: Vec<E>) -> Result<Self, EventBindError> {
        let adapter = grid.adapter();
        for (index, event) in events.iter().enumerate() {
            if adapter.is_before(event.end(), event.start()) {
                return Err(EventBindError::InvalidInterval {
                    index,
                    start: adapter.to_iso(event.start()),
                    end: adapter.to_iso(event.end()),
                });
            }
        }

        let unit = grid.cell_unit();
        let view = match (grid.first(), grid.last()) {
            (Some(first), Some(last)) => Some((first.date, unit.next(adapter, last.date))),
            _ => None,
        };
        Ok(Self {
            adapter: adapter.clone(),
            unit,
            anchor: grid.first().map(|cell| cell.date),
            events,
            view,
        })
    }

    pub fn all(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for_cell<T>(&self, cell: &Cell<T, A::Date>) -> Vec<&E> {
        self.overlapping(cell.date, self.unit.next(&self.adapter, cell.date))
    }

    /// Events overlapping the cell that would contain `date`, whether or not
    /// that cell is part of the grid.
    pub fn events_for_date(&self, date: A::Date) -> Vec<&E> {
        let cell_start = self.unit.cell_start(&self.adapter, date, self.anchor);
        self.overlapping(cell_start, self.unit.next(&self.adapter, cell_start))
    }

    /// Events overlapping any cell of the grid they were bound to.
    pub fn events_in_view(&self) -> Vec<&E> {
        match self.view {
            Some((start, end)) => self.overlapping(start, end),
            None => Vec::new(),
        }
    }

    fn overlapping(&self, span_start: A::Date, span_end: A::Date) -> Vec<&E> {
        self.events
            .iter()
            .filter(|event| overlaps(event.start(), event.end(), span_start, span_end))
            .collect()
    }
}

fn overlaps<D: Ord>(start: D, end: D, span_start: D, span_end: D) -> bool {
    if start == end {
        return span_start <= start && start < span_end;
    }
    start < span_end && end > span_start
}

/// Composes [`Events`] onto a grid.
#[derive(Debug, Clone)]
pub struct EventsPlugin<E> {
    events: Vec<E>,
}

impl<E> EventsPlugin<E> {
    pub fn new(events: Vec<E>) -> Self {
        Self { events }
    }
}

impl<T, E, A> Plugin<T, A> for EventsPlugin<E>
where
    E: TimedEvent<A::Date> + Clone + Send + Sync + 'static,
    A: DateAdapter,
{
    fn name(&self) -> &'static str {
        Events::<E, A>::NAME
    }

    fn extend(&self, grid: TimeGrid<T, A>) -> Result<TimeGrid<T, A>, ExtensionError> {
        let events = Events::bind(&grid, self.events.clone()).map_err(|err| {
            debug!("event=events_bind module=events status=error reason=invalid_interval");
            ExtensionError::InvalidData {
                capability: Events::<E, A>::NAME.to_string(),
                reason: err.to_string(),
            }
        })?;
        debug!(
            "event=events_bind module=events status=ok events={} in_view={}",
            events.len(),
            events.events_in_view().len()
        );
        Ok(grid.with_extension(events))
    }
}

/// Event binding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventBindError {
    InvalidInterval {
        index: usize,
        start: String,
        end: String,
    },
}

impl Display for EventBindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInterval { index, start, end } => write!(
                f,
                "event #{index} ends before it starts: start={start} end={end}"
            ),
        }
    }
}

impl Error for EventBindError {}
