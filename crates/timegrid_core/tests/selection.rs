use chrono::NaiveDateTime;
use timegrid_core::{
    build_grid, pipe, ChronoAdapter, DateAdapter, GridOptions, Range, Selection, SelectionMode,
    SelectionPlugin, TimeGrid, Unit,
};

fn grid() -> TimeGrid<(), ChronoAdapter> {
    let adapter = ChronoAdapter::new();
    let range = Range::new(
        adapter.from_iso("2026-03-01").expect("parse"),
        adapter.from_iso("2026-03-31").expect("parse"),
    );
    build_grid(&adapter, &GridOptions::new(range, Unit::Day)).expect("grid build")
}

fn selection(grid: TimeGrid<(), ChronoAdapter>, mode: SelectionMode) -> TimeGrid<(), ChronoAdapter> {
    pipe(grid, &[&SelectionPlugin::new(mode)]).expect("pipe")
}

#[test]
fn range_membership_ignores_selection_order() {
    let grid = selection(grid(), SelectionMode::Range);
    let ops = grid
        .extension::<Selection<NaiveDateTime>>()
        .expect("selection present");
    let early = &grid.cells()[4];
    let late = &grid.cells()[20];

    let forward = ops.select(&ops.select(&ops.initial_state(), early), late);
    let backward = ops.select(&ops.select(&ops.initial_state(), late), early);
    assert_ne!(forward, backward);

    for cell in grid.iter() {
        assert_eq!(
            ops.is_in_range(&forward, cell),
            ops.is_in_range(&backward, cell),
            "membership of {} depends on order",
            cell.key
        );
    }
    let inside = grid.iter().filter(|cell| ops.is_in_range(&forward, *cell)).count();
    assert_eq!(inside, 17);
    assert!(ops.is_selected(&backward, early));
    assert!(!ops.is_selected(&backward, &grid.cells()[10]));
}

#[test]
fn third_pick_starts_a_new_range() {
    let grid = selection(grid(), SelectionMode::Range);
    let ops = grid
        .extension::<Selection<NaiveDateTime>>()
        .expect("selection present");
    let complete = ops.select(
        &ops.select(&ops.initial_state(), &grid.cells()[1]),
        &grid.cells()[5],
    );
    let restarted = ops.select(&complete, &grid.cells()[12]);

    assert_eq!(restarted.range_start, Some(grid.cells()[12].to_ref()));
    assert!(restarted.range_end.is_none());
    assert!(!ops.is_in_range(&restarted, &grid.cells()[3]));
}

#[test]
fn single_mode_tracks_one_cell() {
    let grid = selection(grid(), SelectionMode::Single);
    let ops = grid
        .extension::<Selection<NaiveDateTime>>()
        .expect("selection present");
    let state = ops.select(&ops.initial_state(), &grid.cells()[7]);

    let selected: Vec<_> = grid
        .iter()
        .filter(|cell| ops.is_selected(&state, *cell))
        .map(|cell| cell.key.as_str())
        .collect();
    assert_eq!(selected, vec!["2026-03-08"]);
    assert!(state.range_start.is_none());
    assert_eq!(ops.clear(), ops.initial_state());
}
