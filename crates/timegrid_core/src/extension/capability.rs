//! Capability declarations and the per-grid capability set.

use crate::date::DateAdapter;
use crate::model::grid::TimeGrid;
use std::any::Any;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Operations object a capability attaches to a grid.
///
/// The value is immutable once attached; state transitions go through the
/// capability's own methods and return new state records.
pub trait Extension: Any + Send + Sync {
    /// Stable name the capability is registered under, e.g. `navigation`.
    const NAME: &'static str;
}

/// One composable capability.
///
/// `extend` receives the previous step's grid and returns a new one carrying
/// an extension registered under `name()`.
pub trait Plugin<T, A: DateAdapter> {
    fn name(&self) -> &'static str;

    fn extend(&self, grid: TimeGrid<T, A>) -> Result<TimeGrid<T, A>, ExtensionError>;
}

/// Capabilities attached to one grid, keyed by name.
#[derive(Clone, Default)]
pub struct ExtensionSet {
    entries: BTreeMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl ExtensionSet {
    pub(crate) fn insert<E: Extension>(&mut self, extension: E) {
        self.entries.insert(E::NAME, Arc::new(extension));
    }

    pub(crate) fn get<E: Extension>(&self) -> Result<&E, ExtensionError> {
        let entry = self
            .entries
            .get(E::NAME)
            .ok_or_else(|| ExtensionError::CapabilityMissing(E::NAME.to_string()))?;
        entry
            .downcast_ref::<E>()
            .ok_or_else(|| ExtensionError::TypeMismatch(E::NAME.to_string()))
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}

impl Debug for ExtensionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Whether `value` is a valid capability name: lowercase ASCII words joined
/// by single `.`, `_` or `-` separators.
pub fn is_valid_capability_name(value: &str) -> bool {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !first.is_ascii_lowercase() {
        return false;
    }

    let mut prev_separator = false;
    for c in chars {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_separator = false;
            continue;
        }
        if c == '.' || c == '_' || c == '-' {
            if prev_separator {
                return false;
            }
            prev_separator = true;
            continue;
        }
        return false;
    }
    !prev_separator
}

/// Capability composition and access errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    InvalidName(String),
    DuplicateCapability(String),
    /// A plugin returned without registering under its own name.
    Unregistered(String),
    CapabilityMissing(String),
    TypeMismatch(String),
    InvalidData { capability: String, reason: String },
}

impl Display for ExtensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(f, "capability name is invalid: {value}"),
            Self::DuplicateCapability(value) => {
                write!(f, "capability already composed onto grid: {value}")
            }
            Self::Unregistered(value) => {
                write!(f, "capability did not register its extension: {value}")
            }
            Self::CapabilityMissing(value) => write!(f, "capability not present: {value}"),
            Self::TypeMismatch(value) => {
                write!(f, "capability `{value}` is bound to a different type")
            }
            Self::InvalidData { capability, reason } => {
                write!(f, "capability `{capability}` rejected its input: {reason}")
            }
        }
    }
}

impl Error for ExtensionError {}
