//! Grid domain model.
//!
//! # Responsibility
//! - Define the values the builder produces and capabilities read.
//!
//! # Invariants
//! - Every cell in a grid is identified by a stable, sortable `CellKey`.
//! - Grids are immutable values; changes produce new grids.

pub mod cell;
pub mod grid;
pub mod range;
