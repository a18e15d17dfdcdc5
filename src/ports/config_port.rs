//! Configuration access port trait.
//!
//! Lookups return `Ok(None)` for an absent key and an error for a value
//! that is present but malformed, so callers never run on a silent default.

use crate::domain::error::LedgerError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, LedgerError>;
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, LedgerError>;
}

/// A config source with no values.
pub struct EmptyConfig;

impl ConfigPort for EmptyConfig {
    fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
        None
    }

    fn get_int(&self, _section: &str, _key: &str) -> Result<Option<i64>, LedgerError> {
        Ok(None)
    }

    fn get_bool(&self, _section: &str, _key: &str) -> Result<Option<bool>, LedgerError> {
        Ok(None)
    }
}
