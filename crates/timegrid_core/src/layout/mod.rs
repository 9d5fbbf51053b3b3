//! Layout helpers over built grids.
//!
//! # Responsibility
//! - Group, reshape and pad an existing grid for presentation layers.
//!
//! # Invariants
//! - Helpers never mutate their input grid.
//! - Helpers do not depend on composed capabilities.

pub mod group;
pub mod matrix;
pub mod padding;

pub use group::{day_of_year, group_by, is_leap_year, CellGroup, GroupBy, GroupLabel};
pub use matrix::to_matrix;
pub use padding::with_padding;

use crate::model::cell::KeyError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Layout configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    InvalidColumns(usize),
    Key(KeyError),
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColumns(value) => {
                write!(f, "matrix column count must be positive, got {value}")
            }
            Self::Key(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidColumns(_) => None,
            Self::Key(err) => Some(err),
        }
    }
}

impl From<KeyError> for LayoutError {
    fn from(value: KeyError) -> Self {
        Self::Key(value)
    }
}
