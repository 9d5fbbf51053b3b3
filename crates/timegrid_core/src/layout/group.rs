//! Cell grouping.

use crate::date::DateAdapter;
use crate::model::cell::Cell;
use crate::model::grid::TimeGrid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const CUMULATIVE_DAYS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Grouping dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Week,
    Weekday,
    Month,
}

/// Identity of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    /// Week 1 is the week containing Jan 1, counted from `week_starts_on`.
    /// Weeks are numbered within `year`, so a calendar row that crosses
    /// Dec 31 / Jan 1 falls into two groups: the last week of one year and
    /// week 1 of the next.
    Week { year: i32, week: u32 },
    Weekday(u8),
    Month { year: i32, month: u32 },
}

/// Cells sharing one label, in grid order.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGroup<'a, T, D> {
    pub label: GroupLabel,
    pub cells: Vec<&'a Cell<T, D>>,
}

/// Buckets `grid`'s cells by `key`, keeping groups in first-seen order.
pub fn group_by<T, A: DateAdapter>(
    grid: &TimeGrid<T, A>,
    key: GroupBy,
) -> Vec<CellGroup<'_, T, A::Date>> {
    let week_starts_on = grid.week_starts_on();
    let mut groups: Vec<CellGroup<'_, T, A::Date>> = Vec::new();
    let mut positions: HashMap<GroupLabel, usize> = HashMap::new();

    for cell in grid.iter() {
        let label = match key {
            GroupBy::Week => GroupLabel::Week {
                year: cell.year,
                week: week_of_year(cell, week_starts_on),
            },
            GroupBy::Weekday => GroupLabel::Weekday(cell.weekday),
            GroupBy::Month => GroupLabel::Month {
                year: cell.year,
                month: cell.month,
            },
        };
        match positions.get(&label) {
            Some(&position) => groups[position].cells.push(cell),
            None => {
                positions.insert(label, groups.len());
                groups.push(CellGroup {
                    label,
                    cells: vec![cell],
                });
            }
        }
    }
    groups
}

/// 1-based day of year.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let month_index = month.clamp(1, 12) as usize - 1;
    let leap_day = u32::from(month > 2 && is_leap_year(year));
    CUMULATIVE_DAYS[month_index] + leap_day + day
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn week_of_year<T, D>(cell: &Cell<T, D>, week_starts_on: u8) -> u32 {
    let ordinal0 = i64::from(day_of_year(cell.year, cell.month, cell.day_of_month)) - 1;
    let jan1_weekday = (i64::from(cell.weekday) - ordinal0).rem_euclid(7);
    let offset = (jan1_weekday - i64::from(week_starts_on)).rem_euclid(7);
    // ordinal0 + offset is non-negative and below 372.
    ((ordinal0 + offset) / 7 + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::{day_of_year, group_by, is_leap_year, GroupBy, GroupLabel};
    use crate::builder::{build_grid, GridOptions};
    use crate::date::{ChronoAdapter, DateAdapter};
    use crate::model::grid::TimeGrid;
    use crate::model::range::Range;
    use crate::unit::Unit;

    fn grid(start: &str, end: &str, week_starts_on: u8) -> TimeGrid<(), ChronoAdapter> {
        let adapter = ChronoAdapter::new();
        let range = Range::new(
            adapter.from_iso(start).expect("parse"),
            adapter.from_iso(end).expect("parse"),
        );
        build_grid(
            &adapter,
            &GridOptions::new(range, Unit::Day).with_week_starts_on(week_starts_on),
        )
        .expect("build")
    }

    #[test]
    fn day_of_year_is_leap_aware() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert_eq!(day_of_year(2024, 3, 1), 61);
        assert_eq!(day_of_year(2026, 3, 1), 60);
        assert_eq!(day_of_year(2026, 12, 31), 365);
    }

    #[test]
    fn week_groups_follow_week_start() {
        // 2026-01-01 is a Thursday; Sunday-first weeks split after Saturday the 3rd.
        let sunday_first_grid = grid("2026-01-01", "2026-01-14", 0);
        let sunday_first = group_by(&sunday_first_grid, GroupBy::Week);
        let sizes: Vec<usize> = sunday_first.iter().map(|g| g.cells.len()).collect();
        assert_eq!(sizes, vec![3, 7, 4]);
        assert_eq!(sunday_first[0].label, GroupLabel::Week { year: 2026, week: 1 });

        let monday_first_grid = grid("2026-01-01", "2026-01-14", 1);
        let monday_first = group_by(&monday_first_grid, GroupBy::Week);
        let sizes: Vec<usize> = monday_first.iter().map(|g| g.cells.len()).collect();
        assert_eq!(sizes, vec![4, 7, 3]);
    }

    #[test]
    fn weekday_groups_keep_first_seen_order() {
        let groups_grid = grid("2026-01-01", "2026-01-14", 0);
        let groups = group_by(&groups_grid, GroupBy::Weekday);
        assert_eq!(groups.len(), 7);
        assert_eq!(groups[0].label, GroupLabel::Weekday(4));
        assert_eq!(groups[0].cells.len(), 2);
        assert_eq!(groups[0].cells[1].key, "2026-01-08");
    }

    #[test]
    fn month_groups_split_at_month_boundaries() {
        let groups_grid = grid("2026-01-30", "2026-02-02", 0);
        let groups = group_by(&groups_grid, GroupBy::Month);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].label, GroupLabel::Month { year: 2026, month: 2 });
    }
}
