//! Calendar preview entry point.
//!
//! # Responsibility
//! - Render a padded seven-column view of the current month, or of the grid
//!   described by a JSON config file passed as the only argument.
//! - Exercise the core crate end to end: config, build, capabilities, layout.
//!
//! Logs go to stderr unless `TIMEGRID_LOG_DIR` names an absolute directory.

use log::{error, info};
use std::env;
use std::fmt::Write as _;
use std::process::ExitCode;
use timegrid_core::{
    build_grid, init_logging, pipe, to_matrix, Cell, ChronoAdapter, DateAdapter, GridConfig,
    GridOptions, LogConfig, NavigationOptions, NavigationPlugin, Padding, PaddingPlugin, Plugin,
    Range, SelectionPlugin, TimeGrid, Unit,
};

const LOG_DIR_ENV: &str = "TIMEGRID_LOG_DIR";
const COLUMNS: usize = 7;
const WEEKDAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

type Grid = TimeGrid<(), ChronoAdapter>;

fn main() -> ExitCode {
    let log_config = match env::var(LOG_DIR_ENV) {
        Ok(dir) => LogConfig::directory(timegrid_core::default_log_level(), dir),
        Err(_) => LogConfig::stderr(timegrid_core::default_log_level()),
    };
    if let Err(err) = init_logging(&log_config) {
        eprintln!("timegrid: logging disabled: {err}");
    }

    println!("timegrid_core version={}", timegrid_core::core_version());
    match run(env::args().nth(1)) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("timegrid: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<String, String> {
    let adapter = ChronoAdapter::new();
    let grid = match config_path {
        Some(path) => grid_from_config(&adapter, &path)?,
        None => current_month(&adapter)?,
    };
    info!(
        "event=cli_render module=cli status=ok unit={} cells={}",
        grid.cell_unit(),
        grid.len()
    );
    render(&grid)
}

fn current_month(adapter: &ChronoAdapter) -> Result<Grid, String> {
    let today = adapter.today();
    let range = Range::new(
        adapter.start_of(today, Unit::Month),
        adapter.end_of(today, Unit::Month),
    );
    let grid = build_grid(adapter, &GridOptions::new(range, Unit::Day))
        .map_err(|err| err.to_string())?;
    let navigation =
        NavigationPlugin::new(NavigationOptions::new(Unit::Month).with_cursor(today));
    pipe(grid, &[&navigation, &PaddingPlugin]).map_err(|err| err.to_string())
}

fn grid_from_config(adapter: &ChronoAdapter, path: &str) -> Result<Grid, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read config `{path}`: {err}"))?;
    let resolved = GridConfig::from_json_str(&raw)
        .and_then(|config| config.resolve(adapter))
        .map_err(|err| format!("{path}: {err}"))?;

    let grid = build_grid(adapter, &resolved.grid).map_err(|err| err.to_string())?;
    let navigation = resolved.navigation.map(NavigationPlugin::new);
    let selection = resolved.selection.map(SelectionPlugin::new);

    let mut plugins: Vec<&dyn Plugin<(), ChronoAdapter>> = Vec::new();
    if let Some(navigation) = &navigation {
        plugins.push(navigation);
    }
    if let Some(selection) = &selection {
        plugins.push(selection);
    }
    plugins.push(&PaddingPlugin);
    pipe(grid, &plugins).map_err(|err| err.to_string())
}

fn render(grid: &Grid) -> Result<String, String> {
    let mut out = String::new();
    let padding = grid.extension::<Padding>().map_err(|err| err.to_string())?;
    let _ = writeln!(
        out,
        "unit={} cells={} leading={} trailing={} capabilities={}",
        grid.cell_unit(),
        grid.len() - padding.leading - padding.trailing,
        padding.leading,
        padding.trailing,
        grid.extension_names().join(",")
    );

    if grid.cell_unit() == Unit::Day {
        let start = usize::from(grid.week_starts_on());
        let header: Vec<&str> = (0..COLUMNS)
            .map(|offset| WEEKDAY_NAMES[(start + offset) % COLUMNS])
            .collect();
        let _ = writeln!(out, "{}", header.join("  "));
    }

    for row in to_matrix(grid.cells(), COLUMNS).map_err(|err| err.to_string())? {
        let line: Vec<String> = row.iter().map(|cell| label(grid.cell_unit(), cell)).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    Ok(out)
}

fn label<D>(unit: Unit, cell: &Cell<(), D>) -> String {
    if cell.is_padding {
        return match unit {
            Unit::Day => ".. ".to_string(),
            _ => format!("{} ", "-".repeat(cell.key.as_str().len())),
        };
    }
    let text = match unit {
        Unit::Day => format!("{:>2}", cell.day_of_month),
        _ => cell.key.as_str().to_string(),
    };
    let marker = if cell.is_today { '*' } else { ' ' };
    format!("{text}{marker}")
}
