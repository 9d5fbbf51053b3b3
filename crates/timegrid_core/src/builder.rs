//! Grid builder and data binding.
//!
//! # Responsibility
//! - Walk a range cell by cell using the unit registry.
//! - Bucket caller data onto the cells its instants fall into.
//!
//! # Invariants
//! - An inverted range yields an empty grid, never an error.
//! - Items are bucketed with the unit's own normalization, so an item lands in
//!   exactly one cell when its instant is inside the grid and in none otherwise.
//! - Building is O(cells + items).

use crate::date::DateAdapter;
use crate::extension::{pipe, ExtensionError, Plugin};
use crate::model::cell::{Cell, CellKey, KeyError};
use crate::model::grid::TimeGrid;
use crate::model::range::Range;
use crate::unit::Unit;
use log::debug;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validated build inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions<D> {
    pub range: Range<D>,
    pub cell_unit: Unit,
    /// 0 = Sunday .. 6 = Saturday. `None` uses the adapter default.
    pub week_starts_on: Option<u8>,
}

impl<D> GridOptions<D> {
    pub fn new(range: Range<D>, cell_unit: Unit) -> Self {
        Self {
            range,
            cell_unit,
            week_starts_on: None,
        }
    }

    pub fn with_week_starts_on(mut self, week_starts_on: u8) -> Self {
        self.week_starts_on = Some(week_starts_on);
        self
    }
}

/// Builds a grid with no bound data.
pub fn build_grid<T, A: DateAdapter>(
    adapter: &A,
    options: &GridOptions<A::Date>,
) -> Result<TimeGrid<T, A>, GridError> {
    build_grid_with_data(adapter, options, Vec::new(), |_: &T| options.range.start)
}

/// Builds a grid and binds `data` by `get_item_date`.
///
/// Items whose instant falls outside the grid are dropped.
///
/// # Errors
/// - `InvalidWeekStart` when `week_starts_on` is not in `0..=6`.
/// - `Key` when a cell year cannot be keyed sortably.
pub fn build_grid_with_data<T, A, I, F>(
    adapter: &A,
    options: &GridOptions<A::Date>,
    data: I,
    get_item_date: F,
) -> Result<TimeGrid<T, A>, GridError>
where
    A: DateAdapter,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> A::Date,
{
    let week_starts_on = options
        .week_starts_on
        .unwrap_or_else(|| adapter.default_week_starts_on());
    if week_starts_on > 6 {
        return Err(GridError::InvalidWeekStart(week_starts_on));
    }

    let unit = options.cell_unit;
    let range = options.range;
    if range.is_inverted() {
        debug!("event=grid_build module=builder status=skip unit={unit} reason=inverted_range");
        return Ok(TimeGrid::from_parts(
            adapter.clone(),
            Vec::new(),
            range,
            unit,
            week_starts_on,
        ));
    }

    let dates = walk_range(adapter, unit, range);
    let keys = dates
        .iter()
        .map(|date| CellKey::from_date(adapter, unit, *date))
        .collect::<Result<Vec<_>, _>>()?;

    let anchor = dates.first().copied();
    let positions: HashMap<&CellKey, usize> =
        keys.iter().enumerate().map(|(index, key)| (key, index)).collect();
    let mut buckets: Vec<Vec<T>> = dates.iter().map(|_| Vec::new()).collect();
    let mut item_count = 0usize;
    let mut unbound_count = 0usize;
    for item in data {
        item_count += 1;
        let cell_start = unit.cell_start(adapter, get_item_date(&item), anchor);
        let slot = CellKey::from_date(adapter, unit, cell_start)
            .ok()
            .and_then(|key| positions.get(&key).copied());
        match slot {
            Some(index) => buckets[index].push(item),
            None => unbound_count += 1,
        }
    }

    let today = adapter.today();
    let cells: Vec<Cell<T, A::Date>> = dates
        .into_iter()
        .zip(keys)
        .zip(buckets)
        .map(|((date, key), items)| Cell::new(adapter, unit, key, date, today, items))
        .collect();

    debug!(
        "event=grid_build module=builder status=ok unit={unit} cells={} items={item_count} unbound_items={unbound_count}",
        cells.len()
    );
    Ok(TimeGrid::from_parts(
        adapter.clone(),
        cells,
        range,
        unit,
        week_starts_on,
    ))
}

/// Builds a grid, binds `data` and composes `plugins` onto it in order.
pub fn build_grid_with_plugins<T, A, I, F>(
    adapter: &A,
    options: &GridOptions<A::Date>,
    data: I,
    get_item_date: F,
    plugins: &[&dyn Plugin<T, A>],
) -> Result<TimeGrid<T, A>, GridError>
where
    A: DateAdapter,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> A::Date,
{
    let grid = build_grid_with_data(adapter, options, data, get_item_date)?;
    Ok(pipe(grid, plugins)?)
}

fn walk_range<A: DateAdapter>(adapter: &A, unit: Unit, range: Range<A::Date>) -> Vec<A::Date> {
    let mut dates = Vec::new();
    let mut cursor = unit.normalize(adapter, range.start);
    while !unit.is_after(adapter, cursor, range.end) {
        dates.push(cursor);
        let next = unit.next(adapter, cursor);
        // Saturated at the adapter's representable edge.
        if !adapter.is_after(next, cursor) {
            break;
        }
        cursor = next;
    }
    dates
}

/// Grid construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    InvalidWeekStart(u8),
    Key(KeyError),
    Extension(ExtensionError),
}

impl Display for GridError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeekStart(value) => {
                write!(f, "week start must be 0..=6 (0 = Sunday), got {value}")
            }
            Self::Key(err) => write!(f, "{err}"),
            Self::Extension(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidWeekStart(_) => None,
            Self::Key(err) => Some(err),
            Self::Extension(err) => Some(err),
        }
    }
}

impl From<KeyError> for GridError {
    fn from(value: KeyError) -> Self {
        Self::Key(value)
    }
}

impl From<ExtensionError> for GridError {
    fn from(value: ExtensionError) -> Self {
        Self::Extension(value)
    }
}
