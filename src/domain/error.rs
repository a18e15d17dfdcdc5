//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for ledgerline.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("Invalid date format. Please enter the date in {expected} format")]
    InvalidDate { input: String, expected: String },

    #[error("{reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid category. Please enter 'I' for Income or 'E' for Expense.")]
    InvalidCategory { input: String },

    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no valid {field} after {attempts} attempts")]
    RetriesExhausted { field: String, attempts: u32 },

    #[error("input closed")]
    InputClosed,

    #[error("nothing to plot")]
    NothingToPlot,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// True for errors caused by a bad user answer, which prompts retry on.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidDate { .. }
                | LedgerError::InvalidAmount { .. }
                | LedgerError::InvalidCategory { .. }
                | LedgerError::InvalidRange { .. }
        )
    }
}

impl From<&LedgerError> for std::process::ExitCode {
    fn from(err: &LedgerError) -> Self {
        let code: u8 = match err {
            LedgerError::Io(_) | LedgerError::NothingToPlot => 1,
            LedgerError::ConfigParse { .. } | LedgerError::ConfigInvalid { .. } => 2,
            LedgerError::Storage { .. } => 3,
            LedgerError::InvalidDate { .. }
            | LedgerError::InvalidAmount { .. }
            | LedgerError::InvalidCategory { .. }
            | LedgerError::InvalidRange { .. } => 4,
            LedgerError::RetriesExhausted { .. } | LedgerError::InputClosed => 5,
        };
        std::process::ExitCode::from(code)
    }
}
