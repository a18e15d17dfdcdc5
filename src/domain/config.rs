//! Ledger configuration built from a [`ConfigPort`].

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;
use std::path::PathBuf;

use crate::domain::error::LedgerError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_CSV_FILE: &str = "finance_data.csv";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";
pub const DEFAULT_PLOT_FILE: &str = "finance_plot.svg";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// Padding around the plot area on every side, in pixels.
pub const PLOT_PADDING: u32 = 60;
/// Smallest chart dimension that still leaves a drawable plot area.
pub const MIN_PLOT_SIZE: u32 = 2 * PLOT_PADDING + 1;
pub const COLUMNS: [&str; 4] = ["date", "amount", "category", "description"];

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    pub csv_file: PathBuf,
    pub date_format: String,
    pub max_attempts: u32,
    /// Empty answer to the transaction date prompt means today.
    pub default_today: bool,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            default_today: true,
            plot: PlotConfig::default(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_PLOT_FILE),
            width: 800,
            height: 400,
        }
    }
}

impl LedgerConfig {
    pub fn from_config(adapter: &dyn ConfigPort) -> Result<Self, LedgerError> {
        let defaults = Self::default();

        let csv_file = adapter
            .get_string("storage", "csv_file")
            .map(PathBuf::from)
            .unwrap_or(defaults.csv_file);

        let date_format = adapter
            .get_string("storage", "date_format")
            .unwrap_or(defaults.date_format);
        validate_date_format(&date_format)?;

        let max_attempts = bounded_u32(
            adapter.get_int("input", "max_attempts")?,
            defaults.max_attempts,
            1,
            "input",
            "max_attempts",
        )?;

        let output = adapter
            .get_string("plot", "output")
            .map(PathBuf::from)
            .unwrap_or(defaults.plot.output);
        let width = bounded_u32(
            adapter.get_int("plot", "width")?,
            defaults.plot.width,
            MIN_PLOT_SIZE,
            "plot",
            "width",
        )?;
        let height = bounded_u32(
            adapter.get_int("plot", "height")?,
            defaults.plot.height,
            MIN_PLOT_SIZE,
            "plot",
            "height",
        )?;

        Ok(Self {
            csv_file,
            date_format,
            max_attempts,
            default_today: adapter
                .get_bool("input", "default_today")?
                .unwrap_or(defaults.default_today),
            plot: PlotConfig {
                output,
                width,
                height,
            },
        })
    }
}

/// `value` (or `default` when unset) as a `u32` no smaller than `min`.
fn bounded_u32(
    value: Option<i64>,
    default: u32,
    min: u32,
    section: &str,
    key: &str,
) -> Result<u32, LedgerError> {
    let Some(value) = value else {
        return Ok(default);
    };
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= min)
        .ok_or_else(|| LedgerError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("must be an integer of at least {min}, got {value}"),
        })
}

/// A usable date format must render and re-parse a date unchanged.
fn validate_date_format(format: &str) -> Result<(), LedgerError> {
    let invalid = || LedgerError::ConfigInvalid {
        section: "storage".into(),
        key: "date_format".into(),
        reason: format!("'{format}' does not round-trip a calendar date"),
    };
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }
    // Time and offset specifiers cannot render a bare date and fail here.
    let sample = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default();
    let mut rendered = String::new();
    write!(rendered, "{}", sample.format(format)).map_err(|_| invalid())?;
    match NaiveDate::parse_from_str(&rendered, format) {
        Ok(parsed) if parsed == sample => Ok(()),
        _ => Err(invalid()),
    }
}
