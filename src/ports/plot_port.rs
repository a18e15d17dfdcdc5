//! Chart output port trait.

use crate::domain::error::LedgerError;
use crate::domain::summary::DailySeries;
use std::path::PathBuf;

/// Port for rendering income/expense series.
pub trait PlotPort {
    /// Render the series and return where the chart was written.
    fn plot(&self, series: &DailySeries, title: &str) -> Result<PathBuf, LedgerError>;
}
