//! Core time-grid engine.
//! Builds ordered, unit-normalized time cells over a range and composes
//! independent capabilities (navigation, selection, events, padding) onto them.

pub mod builder;
pub mod config;
pub mod date;
pub mod extension;
pub mod layout;
pub mod logging;
pub mod model;
pub mod plugins;
pub mod unit;

pub use builder::{build_grid, build_grid_with_data, build_grid_with_plugins, GridError, GridOptions};
pub use config::{ConfigError, GridConfig, ResolvedConfig};
pub use date::{ChronoAdapter, DateAdapter, DateParseError};
pub use extension::{pipe, pipe_with_policy, CollisionPolicy, Extension, ExtensionError, Plugin};
pub use layout::{group_by, to_matrix, with_padding, CellGroup, GroupBy, GroupLabel, LayoutError};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LogTarget};
pub use model::cell::{Cell, CellKey, CellRef, KeyError};
pub use model::grid::TimeGrid;
pub use model::range::Range;
pub use plugins::{
    EventBindError, Events, EventsPlugin, Navigation, NavigationOptions, NavigationPlugin,
    NavigationState, Padding, PaddingPlugin, Selection, SelectionMode, SelectionPlugin,
    SelectionState, TimedEvent,
};
pub use unit::{parse_unit, Unit, UnitParseError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
