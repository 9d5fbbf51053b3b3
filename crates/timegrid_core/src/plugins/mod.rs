//! First-party capabilities.
//!
//! Each capability is an immutable operations object plus an initial state.
//! Transitions take the current state and return the next one; callers thread
//! the state between calls.

pub mod events;
pub mod navigation;
pub mod padding;
pub mod selection;

pub use events::{EventBindError, Events, EventsPlugin, TimedEvent};
pub use navigation::{Navigation, NavigationOptions, NavigationPlugin, NavigationState};
pub use padding::{Padding, PaddingPlugin};
pub use selection::{Selection, SelectionMode, SelectionPlugin, SelectionState};
