//! Declarative grid configuration.
//!
//! # Responsibility
//! - Read build and capability settings from JSON with ISO date strings.
//! - Resolve them through a date adapter into validated typed options.
//!
//! # Invariants
//! - Unknown fields are rejected rather than ignored.
//! - Resolution never builds a grid; it only validates inputs.

use crate::builder::GridOptions;
use crate::date::{DateAdapter, DateParseError};
use crate::model::range::Range;
use crate::plugins::navigation::NavigationOptions;
use crate::plugins::selection::SelectionMode;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    pub range: RangeConfig,
    #[serde(default = "default_cell_unit")]
    pub cell_unit: Unit,
    #[serde(default)]
    pub week_starts_on: Option<u8>,
    #[serde(default)]
    pub navigation: Option<NavigationConfig>,
    #[serde(default)]
    pub selection: Option<SelectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeConfig {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationConfig {
    pub unit: Unit,
    #[serde(default = "default_year_step")]
    pub year_step: u32,
    /// ISO cursor; omitted means "today".
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    #[serde(default)]
    pub mode: SelectionMode,
}

fn default_cell_unit() -> Unit {
    Unit::Day
}

fn default_year_step() -> u32 {
    1
}

/// Typed options produced by [`GridConfig::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig<D> {
    pub grid: GridOptions<D>,
    pub navigation: Option<NavigationOptions<D>>,
    pub selection: Option<SelectionMode>,
}

impl GridConfig {
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(value).map_err(ConfigError::Json)
    }

    /// Validates the document and parses its dates with `adapter`.
    ///
    /// # Errors
    /// - `Date` when a date string is not ISO-8601.
    /// - `InvalidWeekStart` when `week_starts_on` is outside `0..=6`.
    /// - `InvalidYearStep` when `navigation.year_step` is zero.
    pub fn resolve<A: DateAdapter>(
        &self,
        adapter: &A,
    ) -> Result<ResolvedConfig<A::Date>, ConfigError> {
        let start = parse_field(adapter, "range.start", &self.range.start)?;
        let end = parse_field(adapter, "range.end", &self.range.end)?;

        let mut grid = GridOptions::new(Range::new(start, end), self.cell_unit);
        if let Some(week_starts_on) = self.week_starts_on {
            if week_starts_on > 6 {
                return Err(ConfigError::InvalidWeekStart(week_starts_on));
            }
            grid = grid.with_week_starts_on(week_starts_on);
        }

        let navigation = match &self.navigation {
            Some(config) => {
                if config.year_step == 0 {
                    return Err(ConfigError::InvalidYearStep);
                }
                let mut options =
                    NavigationOptions::new(config.unit).with_year_step(config.year_step);
                if let Some(cursor) = &config.cursor {
                    options = options.with_cursor(parse_field(adapter, "navigation.cursor", cursor)?);
                }
                Some(options)
            }
            None => None,
        };

        Ok(ResolvedConfig {
            grid,
            navigation,
            selection: self.selection.as_ref().map(|config| config.mode),
        })
    }
}

fn parse_field<A: DateAdapter>(
    adapter: &A,
    field: &'static str,
    value: &str,
) -> Result<A::Date, ConfigError> {
    adapter
        .from_iso(value)
        .map_err(|source| ConfigError::Date { field, source })
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Date {
        field: &'static str,
        source: DateParseError,
    },
    InvalidWeekStart(u8),
    InvalidYearStep,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid grid config: {err}"),
            Self::Date { field, source } => write!(f, "invalid `{field}`: {source}"),
            Self::InvalidWeekStart(value) => {
                write!(f, "`week_starts_on` must be 0..=6 (0 = Sunday), got {value}")
            }
            Self::InvalidYearStep => write!(f, "`navigation.year_step` must be at least 1"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Date { source, .. } => Some(source),
            Self::InvalidWeekStart(_) | Self::InvalidYearStep => None,
        }
    }
}
