//! Transaction storage port trait.

use crate::domain::error::LedgerError;
use crate::domain::transaction::Transaction;
use chrono::NaiveDate;

pub trait LedgerPort {
    /// Make sure the backing store exists, creating it empty if needed.
    fn initialize(&self) -> Result<(), LedgerError>;

    fn append(&self, transaction: &Transaction) -> Result<(), LedgerError>;

    /// Every stored transaction in insertion order.
    fn load_all(&self) -> Result<Vec<Transaction>, LedgerError>;

    /// Stored transactions dated within `[start, end]`, in insertion order.
    fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let all = self.load_all()?;
        Ok(crate::domain::summary::filter_by_range(&all, start, end))
    }
}
