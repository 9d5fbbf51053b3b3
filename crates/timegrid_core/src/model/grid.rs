//! Immutable grid value.
//!
//! # Responsibility
//! - Hold the generated cells plus the inputs that produced them.
//! - Offer lookups and the typed extension accessors used by capabilities.
//!
//! # Invariants
//! - Cells are strictly increasing by date and by key.
//! - A grid is never mutated; `with_*` methods consume and return a new value.
//! - `with_extension` keeps the `cells` allocation; only `with_cells` replaces it.

use crate::date::DateAdapter;
use crate::extension::{Extension, ExtensionError, ExtensionSet};
use crate::model::cell::{Cell, CellKey};
use crate::model::range::Range;
use crate::unit::Unit;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Ordered, unit-normalized cells over a range.
pub struct TimeGrid<T, A: DateAdapter> {
    adapter: A,
    cells: Arc<[Cell<T, A::Date>]>,
    range: Range<A::Date>,
    cell_unit: Unit,
    week_starts_on: u8,
    extensions: ExtensionSet,
}

impl<T, A: DateAdapter> Clone for TimeGrid<T, A> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            cells: Arc::clone(&self.cells),
            range: self.range,
            cell_unit: self.cell_unit,
            week_starts_on: self.week_starts_on,
            extensions: self.extensions.clone(),
        }
    }
}

impl<T: Debug, A: DateAdapter> Debug for TimeGrid<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeGrid")
            .field("range", &self.range)
            .field("cell_unit", &self.cell_unit)
            .field("week_starts_on", &self.week_starts_on)
            .field("cells", &self.cells)
            .field("extensions", &self.extensions)
            .finish()
    }
}

impl<T, A: DateAdapter> TimeGrid<T, A> {
    pub(crate) fn from_parts(
        adapter: A,
        cells: Vec<Cell<T, A::Date>>,
        range: Range<A::Date>,
        cell_unit: Unit,
        week_starts_on: u8,
    ) -> Self {
        Self {
            adapter,
            cells: Arc::from(cells),
            range,
            cell_unit,
            week_starts_on,
            extensions: ExtensionSet::default(),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn cells(&self) -> &[Cell<T, A::Date>] {
        &self.cells
    }

    pub fn range(&self) -> Range<A::Date> {
        self.range
    }

    pub fn cell_unit(&self) -> Unit {
        self.cell_unit
    }

    pub fn week_starts_on(&self) -> u8 {
        self.week_starts_on
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell<T, A::Date>> {
        self.cells.iter()
    }

    pub fn first(&self) -> Option<&Cell<T, A::Date>> {
        self.cells.first()
    }

    pub fn last(&self) -> Option<&Cell<T, A::Date>> {
        self.cells.last()
    }

    /// Finds a cell by key. Relies on key order matching cell order.
    pub fn cell_by_key(&self, key: &str) -> Option<&Cell<T, A::Date>> {
        self.index_of_key(key).map(|index| &self.cells[index])
    }

    /// Finds the cell whose span contains `date`.
    ///
    /// Dates outside the grid return `None`.
    pub fn cell_by_date(&self, date: A::Date) -> Option<&Cell<T, A::Date>> {
        self.index_of_date(date).map(|index| &self.cells[index])
    }

    /// Position of the cell whose span contains `date`.
    pub fn index_of_date(&self, date: A::Date) -> Option<usize> {
        let cell_start = self.cell_start(date);
        self.cells
            .binary_search_by(|cell| cell.date.cmp(&cell_start))
            .ok()
    }

    pub fn contains_date(&self, date: A::Date) -> bool {
        self.index_of_date(date).is_some()
    }

    fn index_of_key(&self, key: &str) -> Option<usize> {
        self.cells
            .binary_search_by(|cell| cell.key.as_str().cmp(key))
            .ok()
    }

    /// Whether both grids point at the same cell allocation.
    pub fn shares_cells_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    /// Typed access to a composed capability.
    ///
    /// # Errors
    /// - `CapabilityMissing` when no capability was composed under `E::NAME`.
    /// - `TypeMismatch` when the name is bound to a different type.
    pub fn extension<E: Extension>(&self) -> Result<&E, ExtensionError> {
        self.extensions.get::<E>()
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Names of composed capabilities, sorted.
    pub fn extension_names(&self) -> Vec<&'static str> {
        self.extensions.names()
    }

    /// Returns a grid carrying `extension` under `E::NAME`, replacing any
    /// previous value with that name. Cells are shared, not copied.
    pub fn with_extension<E: Extension>(mut self, extension: E) -> Self {
        self.extensions.insert(extension);
        self
    }

    /// Returns a grid over a replacement cell sequence. Extensions are kept.
    pub(crate) fn with_cells(mut self, cells: Vec<Cell<T, A::Date>>) -> Self {
        self.cells = Arc::from(cells);
        self
    }

    /// Key of the cell containing `date` in this grid's unit and alignment,
    /// whether or not that cell is part of the grid.
    pub fn key_for_date(&self, date: A::Date) -> Option<CellKey> {
        CellKey::from_date(&self.adapter, self.cell_unit, self.cell_start(date)).ok()
    }

    fn cell_start(&self, date: A::Date) -> A::Date {
        let anchor = self.cells.first().map(|cell| cell.date);
        self.cell_unit.cell_start(&self.adapter, date, anchor)
    }
}

impl<'a, T, A: DateAdapter> IntoIterator for &'a TimeGrid<T, A> {
    type Item = &'a Cell<T, A::Date>;
    type IntoIter = std::slice::Iter<'a, Cell<T, A::Date>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
