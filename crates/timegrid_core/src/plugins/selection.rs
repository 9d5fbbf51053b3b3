//! Cell selection capability.
//!
//! Range mode runs a three-phase cycle: the first `select` after a clear sets
//! `range_start`, the second sets `range_end`, and any later `select` starts a
//! new range. Bounds are stored in call order, not chronological order;
//! `is_in_range` compares against the min/max of the two keys so either order
//! answers the same.

use crate::date::DateAdapter;
use crate::extension::{Extension, ExtensionError, Plugin};
use crate::model::cell::{Cell, CellRef};
use crate::model::grid::TimeGrid;
use log::debug;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Selection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
}

/// Selection state record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState<D> {
    pub selected: Option<CellRef<D>>,
    pub range_start: Option<CellRef<D>>,
    pub range_end: Option<CellRef<D>>,
}

impl<D> Default for SelectionState<D> {
    fn default() -> Self {
        Self {
            selected: None,
            range_start: None,
            range_end: None,
        }
    }
}

/// Selection operations attached to a grid under `selection`.
#[derive(Debug, Clone, Copy)]
pub struct Selection<D> {
    mode: SelectionMode,
    _date: PhantomData<fn() -> D>,
}

impl<D: Send + Sync + 'static> Extension for Selection<D> {
    const NAME: &'static str = "selection";
}

impl<D: Copy> Selection<D> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            _date: PhantomData,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Empty state at composition time.
    pub fn initial_state(&self) -> SelectionState<D> {
        SelectionState::default()
    }

    pub fn select<T>(&self, state: &SelectionState<D>, cell: &Cell<T, D>) -> SelectionState<D> {
        let picked = cell.to_ref();
        match self.mode {
            SelectionMode::Single => SelectionState {
                selected: Some(picked),
                range_start: None,
                range_end: None,
            },
            SelectionMode::Range => match (&state.range_start, &state.range_end) {
                (Some(start), None) => SelectionState {
                    selected: None,
                    range_start: Some(start.clone()),
                    range_end: Some(picked),
                },
                _ => SelectionState {
                    selected: None,
                    range_start: Some(picked),
                    range_end: None,
                },
            },
        }
    }

    pub fn is_selected<T>(&self, state: &SelectionState<D>, cell: &Cell<T, D>) -> bool {
        match self.mode {
            SelectionMode::Single => state
                .selected
                .as_ref()
                .is_some_and(|selected| selected.key == cell.key),
            SelectionMode::Range => [&state.range_start, &state.range_end]
                .into_iter()
                .flatten()
                .any(|bound| bound.key == cell.key),
        }
    }

    /// Range membership by key order. In single mode this is `is_selected`.
    pub fn is_in_range<T>(&self, state: &SelectionState<D>, cell: &Cell<T, D>) -> bool {
        if self.mode == SelectionMode::Single {
            return self.is_selected(state, cell);
        }
        match (&state.range_start, &state.range_end) {
            (Some(start), Some(end)) => {
                let (low, high) = if start.key <= end.key {
                    (&start.key, &end.key)
                } else {
                    (&end.key, &start.key)
                };
                *low <= cell.key && cell.key <= *high
            }
            (Some(start), None) => start.key == cell.key,
            _ => false,
        }
    }

    pub fn clear(&self) -> SelectionState<D> {
        SelectionState::default()
    }
}

/// Composes [`Selection`] onto a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionPlugin {
    mode: SelectionMode,
}

impl SelectionPlugin {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode }
    }
}

impl<T, A: DateAdapter> Plugin<T, A> for SelectionPlugin {
    fn name(&self) -> &'static str {
        Selection::<A::Date>::NAME
    }

    fn extend(&self, grid: TimeGrid<T, A>) -> Result<TimeGrid<T, A>, ExtensionError> {
        debug!(
            "event=selection_attach module=selection status=ok mode={:?}",
            self.mode
        );
        Ok(grid.with_extension(Selection::<A::Date>::new(self.mode)))
    }
}
