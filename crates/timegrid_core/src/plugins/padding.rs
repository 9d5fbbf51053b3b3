//! Week padding as a composable capability.
//!
//! This is the one capability that replaces the grid's cells; the padding
//! counts it records let consumers map padded rows back to the original grid.

use crate::date::DateAdapter;
use crate::extension::{Extension, ExtensionError, Plugin};
use crate::layout::padding::pad_cells;
use crate::model::grid::TimeGrid;
use log::debug;

/// Padding counts attached to a grid under `padding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub leading: usize,
    pub trailing: usize,
}

impl Extension for Padding {
    const NAME: &'static str = "padding";
}

/// Composes week padding onto a grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddingPlugin;

impl<T: Clone, A: DateAdapter> Plugin<T, A> for PaddingPlugin {
    fn name(&self) -> &'static str {
        Padding::NAME
    }

    fn extend(&self, grid: TimeGrid<T, A>) -> Result<TimeGrid<T, A>, ExtensionError> {
        let padded = pad_cells(&grid).map_err(|err| ExtensionError::InvalidData {
            capability: Padding::NAME.to_string(),
            reason: err.to_string(),
        })?;
        let padding = Padding {
            leading: padded.leading,
            trailing: padded.trailing,
        };
        debug!(
            "event=padding_attach module=padding status=ok leading={} trailing={}",
            padding.leading, padding.trailing
        );
        let grid = if padding.leading == 0 && padding.trailing == 0 {
            grid
        } else {
            grid.with_cells(padded.cells)
        };
        Ok(grid.with_extension(padding))
    }
}
