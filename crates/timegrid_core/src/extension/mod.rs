//! Capability composition protocol.
//!
//! A capability is a [`Plugin`] that takes a grid and returns a new grid with
//! one named [`Extension`] attached. [`pipe`] applies an ordered list of them
//! and detects name collisions at composition time instead of letting a later
//! capability silently shadow an earlier one.

pub mod capability;
pub mod kernel;

pub use capability::{is_valid_capability_name, Extension, ExtensionError, ExtensionSet, Plugin};
pub use kernel::{pipe, pipe_with_policy, CollisionPolicy};
