//! Capability composition.

use crate::date::DateAdapter;
use crate::extension::capability::{is_valid_capability_name, ExtensionError, Plugin};
use crate::model::grid::TimeGrid;
use log::{debug, warn};

/// What `pipe` does when a capability name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Fail composition with `DuplicateCapability`.
    #[default]
    Reject,
    /// Let the later capability overwrite the earlier one, logging a warning.
    Replace,
}

/// Threads `grid` through `plugins` in order, rejecting name collisions.
pub fn pipe<T, A: DateAdapter>(
    grid: TimeGrid<T, A>,
    plugins: &[&dyn Plugin<T, A>],
) -> Result<TimeGrid<T, A>, ExtensionError> {
    pipe_with_policy(grid, plugins, CollisionPolicy::Reject)
}

/// Threads `grid` through `plugins` in order.
///
/// Each plugin sees the previous plugin's output, so it may read capabilities
/// composed before it. Every plugin must register under its own `name()`.
pub fn pipe_with_policy<T, A: DateAdapter>(
    grid: TimeGrid<T, A>,
    plugins: &[&dyn Plugin<T, A>],
    policy: CollisionPolicy,
) -> Result<TimeGrid<T, A>, ExtensionError> {
    let mut current = grid;
    for plugin in plugins {
        let name = plugin.name();
        if !is_valid_capability_name(name) {
            return Err(ExtensionError::InvalidName(name.to_string()));
        }

        if current.has_extension(name) {
            match policy {
                CollisionPolicy::Reject => {
                    debug!(
                        "event=capability_compose module=extension status=error name={name} reason=duplicate"
                    );
                    return Err(ExtensionError::DuplicateCapability(name.to_string()));
                }
                CollisionPolicy::Replace => {
                    warn!(
                        "event=capability_compose module=extension status=replaced name={name}"
                    );
                }
            }
        }

        current = plugin.extend(current)?;
        if !current.has_extension(name) {
            return Err(ExtensionError::Unregistered(name.to_string()));
        }
        debug!("event=capability_compose module=extension status=ok name={name}");
    }
    Ok(current)
}
