use timegrid_core::{
    build_grid_with_data, group_by, to_matrix, with_padding, ChronoAdapter, DateAdapter, GroupBy,
    GridOptions, LayoutError, Range, TimeGrid, Unit,
};

fn month(start: &str, end: &str, week_starts_on: u8) -> TimeGrid<&'static str, ChronoAdapter> {
    let adapter = ChronoAdapter::new();
    let range = Range::new(
        adapter.from_iso(start).expect("parse"),
        adapter.from_iso(end).expect("parse"),
    );
    let notes = vec!["kickoff", "payroll"];
    build_grid_with_data(
        &adapter,
        &GridOptions::new(range, Unit::Day).with_week_starts_on(week_starts_on),
        notes,
        |note| {
            let date = if *note == "kickoff" { "2026-01-01T09:00" } else { "2026-01-30" };
            ChronoAdapter::new().from_iso(date).expect("parse")
        },
    )
    .expect("grid build")
}

#[test]
fn padding_completes_whole_weeks() {
    for week_starts_on in 0..7 {
        let grid = month("2026-01-01", "2026-01-31", week_starts_on);
        let padded = with_padding(&grid).expect("padding");

        assert_eq!(padded.len() % 7, 0, "week start {week_starts_on}");
        assert_eq!(padded.cells()[0].weekday, week_starts_on);
        let originals: Vec<_> = padded.iter().filter(|cell| !cell.is_padding).collect();
        assert_eq!(originals.len(), grid.len());
        assert!(originals
            .iter()
            .zip(grid.iter())
            .all(|(kept, original)| kept.key == original.key && kept.data == original.data));
        assert!(padded
            .iter()
            .filter(|cell| cell.is_padding)
            .all(|cell| cell.data.is_empty() && cell.month != 1));
        assert_eq!(padded.range(), grid.range());
    }
}

#[test]
fn aligned_month_needs_no_padding() {
    // February 2026 starts on a Sunday and has exactly four weeks.
    let grid = month("2026-02-01", "2026-02-28", 0);
    let padded = with_padding(&grid).expect("padding");
    assert!(padded.shares_cells_with(&grid));
    assert!(padded.iter().all(|cell| !cell.is_padding));
}

#[test]
fn padded_grid_reshapes_into_calendar_rows() {
    let padded = with_padding(&month("2026-01-01", "2026-01-31", 0)).expect("padding");
    let rows = to_matrix(padded.cells(), 7).expect("matrix");

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.len() == 7));
    assert_eq!(rows[0][0].key, "2025-12-28");
    assert_eq!(rows[0][4].key, "2026-01-01");
    assert_eq!(rows[0][4].data, vec!["kickoff"]);
    assert_eq!(rows[4][6].key, "2026-01-31");
    assert_eq!(
        to_matrix(padded.cells(), 0).expect_err("zero columns"),
        LayoutError::InvalidColumns(0)
    );
}

#[test]
fn week_groups_of_a_padded_grid_match_matrix_rows() {
    let padded = with_padding(&month("2026-01-01", "2026-01-31", 1)).expect("padding");
    let rows = to_matrix(padded.cells(), 7).expect("matrix");
    let groups = group_by(&padded, GroupBy::Week);

    let flattened: Vec<_> = groups
        .iter()
        .flat_map(|group| group.cells.iter().map(|cell| cell.key.clone()))
        .collect();
    let ordered: Vec<_> = padded.iter().map(|cell| cell.key.clone()).collect();
    assert_eq!(flattened, ordered);

    // The first row straddles the year boundary, so it yields two groups.
    let sizes: Vec<usize> = groups.iter().map(|group| group.cells.len()).collect();
    assert_eq!(sizes, vec![3, 4, 7, 7, 7, 7]);
    let full_weeks: Vec<_> = groups.iter().filter(|group| group.cells.len() == 7).collect();
    assert_eq!(full_weeks.len(), rows.len() - 1);
    for (group, row) in full_weeks.iter().zip(rows.iter().skip(1)) {
        assert_eq!(group.cells[0].key, row[0].key);
        assert_eq!(group.cells[0].weekday, 1);
    }
}
