#![allow(dead_code)]

use chrono::NaiveDate;
use ledgerline::domain::config::LedgerConfig;
use ledgerline::domain::error::LedgerError;
use ledgerline::domain::summary::DailySeries;
pub use ledgerline::domain::transaction::{Category, Transaction};
use ledgerline::ports::ledger_port::LedgerPort;
use ledgerline::ports::plot_port::PlotPort;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory ledger that records every call.
pub struct MockLedger {
    pub rows: RefCell<Vec<Transaction>>,
    pub initialized: RefCell<usize>,
    pub fail_append: Option<String>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            rows: RefCell::new(Vec::new()),
            initialized: RefCell::new(0),
            fail_append: None,
        }
    }

    pub fn with_rows(rows: Vec<Transaction>) -> Self {
        let ledger = Self::new();
        *ledger.rows.borrow_mut() = rows;
        ledger
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_append: Some(reason.to_string()),
            ..Self::new()
        }
    }
}

impl LedgerPort for MockLedger {
    fn initialize(&self) -> Result<(), LedgerError> {
        *self.initialized.borrow_mut() += 1;
        Ok(())
    }

    fn append(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        if let Some(reason) = &self.fail_append {
            return Err(LedgerError::Storage {
                reason: reason.clone(),
            });
        }
        self.rows.borrow_mut().push(transaction.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.rows.borrow().clone())
    }
}

/// Plotter that remembers the series it was asked to draw.
pub struct MockPlotter {
    pub calls: RefCell<Vec<DailySeries>>,
}

impl MockPlotter {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl PlotPort for MockPlotter {
    fn plot(&self, series: &DailySeries, _title: &str) -> Result<PathBuf, LedgerError> {
        self.calls.borrow_mut().push(series.clone());
        Ok(PathBuf::from("mock_plot.svg"))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_tx(date_str: &str, amount: &str, category: Category, description: &str) -> Transaction {
    Transaction {
        date: NaiveDate::parse_from_str(date_str, "%d-%m-%Y").unwrap(),
        amount: amount.parse::<Decimal>().unwrap(),
        category,
        description: description.to_string(),
    }
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        make_tx("01-01-2024", "2500.00", Category::Income, "salary"),
        make_tx("03-01-2024", "45.20", Category::Expense, "groceries"),
        make_tx("15-01-2024", "1200.00", Category::Expense, "rent"),
        make_tx("01-02-2024", "2500.00", Category::Income, "salary"),
        make_tx("02-02-2024", "60.00", Category::Expense, "utilities"),
    ]
}

pub fn test_config(max_attempts: u32) -> LedgerConfig {
    LedgerConfig {
        max_attempts,
        ..LedgerConfig::default()
    }
}

pub fn today() -> NaiveDate {
    date(2026, 10, 19)
}
