//! Week padding.

use super::LayoutError;
use crate::date::DateAdapter;
use crate::model::cell::{Cell, CellKey};
use crate::model::grid::TimeGrid;
use crate::unit::Unit;

const WEEK_LENGTH: usize = 7;

/// Padded cells plus how many were added on each side.
pub(crate) struct PaddedCells<T, D> {
    pub(crate) cells: Vec<Cell<T, D>>,
    pub(crate) leading: usize,
    pub(crate) trailing: usize,
}

/// Returns `grid` with synthetic cells completing its first and last weeks.
///
/// Day grids are aligned on `week_starts_on`; other units get trailing cells
/// only. The result holds a multiple of seven cells; an empty grid is
/// returned unchanged. Extensions are carried over.
pub fn with_padding<T: Clone, A: DateAdapter>(
    grid: &TimeGrid<T, A>,
) -> Result<TimeGrid<T, A>, LayoutError> {
    let padded = pad_cells(grid)?;
    if padded.leading == 0 && padded.trailing == 0 {
        return Ok(grid.clone());
    }
    Ok(grid.clone().with_cells(padded.cells))
}

pub(crate) fn pad_cells<T: Clone, A: DateAdapter>(
    grid: &TimeGrid<T, A>,
) -> Result<PaddedCells<T, A::Date>, LayoutError> {
    let (first, last) = match (grid.first(), grid.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Ok(PaddedCells {
                cells: Vec::new(),
                leading: 0,
                trailing: 0,
            })
        }
    };

    let adapter = grid.adapter();
    let unit = grid.cell_unit();
    let today = adapter.today();

    let leading = if unit == Unit::Day {
        (usize::from(first.weekday) + WEEK_LENGTH - usize::from(grid.week_starts_on()))
            % WEEK_LENGTH
    } else {
        0
    };
    let trailing = (WEEK_LENGTH - (leading + grid.len()) % WEEK_LENGTH) % WEEK_LENGTH;

    let mut cells = Vec::with_capacity(leading + grid.len() + trailing);
    let mut before = Vec::with_capacity(leading);
    let mut cursor = first.date;
    for _ in 0..leading {
        cursor = unit.prev(adapter, cursor);
        before.push(padding_cell(adapter, unit, cursor, today)?);
    }
    cells.extend(before.into_iter().rev());
    cells.extend(grid.cells().iter().cloned());

    let mut cursor = last.date;
    for _ in 0..trailing {
        cursor = unit.next(adapter, cursor);
        cells.push(padding_cell(adapter, unit, cursor, today)?);
    }

    Ok(PaddedCells {
        cells,
        leading,
        trailing,
    })
}

fn padding_cell<T, A: DateAdapter>(
    adapter: &A,
    unit: Unit,
    date: A::Date,
    today: A::Date,
) -> Result<Cell<T, A::Date>, LayoutError> {
    let key = CellKey::from_date(adapter, unit, date)?;
    let mut cell = Cell::new(adapter, unit, key, date, today, Vec::new());
    cell.is_padding = true;
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::with_padding;
    use crate::builder::{build_grid, GridOptions};
    use crate::date::{ChronoAdapter, DateAdapter};
    use crate::model::grid::TimeGrid;
    use crate::model::range::Range;
    use crate::unit::Unit;

    fn grid(start: &str, end: &str, unit: Unit, week_starts_on: u8) -> TimeGrid<u8, ChronoAdapter> {
        let adapter = ChronoAdapter::new();
        let range = Range::new(
            adapter.from_iso(start).expect("parse"),
            adapter.from_iso(end).expect("parse"),
        );
        build_grid(
            &adapter,
            &GridOptions::new(range, unit).with_week_starts_on(week_starts_on),
        )
        .expect("build")
    }

    #[test]
    fn pads_month_to_whole_weeks() {
        // January 2026 starts on a Thursday and ends on a Saturday.
        let padded = with_padding(&grid("2026-01-01", "2026-01-31", Unit::Day, 0)).expect("pad");
        assert_eq!(padded.len(), 35);
        assert_eq!(padded.cells()[0].key, "2025-12-28");
        assert!(padded.cells()[..4].iter().all(|cell| cell.is_padding));
        assert!(!padded.cells()[4].is_padding);
        assert_eq!(padded.last().expect("last").key, "2026-01-31");
    }

    #[test]
    fn monday_start_adds_trailing_cells() {
        let padded = with_padding(&grid("2026-01-01", "2026-01-31", Unit::Day, 1)).expect("pad");
        assert_eq!(padded.len(), 35);
        assert_eq!(padded.cells()[0].key, "2025-12-29");
        assert_eq!(padded.last().expect("last").key, "2026-02-01");
        assert!(padded.last().expect("last").is_padding);
    }

    #[test]
    fn aligned_grid_is_returned_as_is() {
        let base = grid("2026-02-01", "2026-02-28", Unit::Day, 0);
        let padded = with_padding(&base).expect("pad");
        assert!(padded.shares_cells_with(&base));
    }

    #[test]
    fn non_day_units_pad_trailing_only() {
        let padded = with_padding(&grid("2026-01-01", "2026-12-31", Unit::Month, 0)).expect("pad");
        assert_eq!(padded.len(), 14);
        assert_eq!(padded.cells()[0].key, "2026-01");
        assert_eq!(padded.last().expect("last").key, "2027-02");
    }
}
