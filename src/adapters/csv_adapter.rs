//! Flat CSV file ledger adapter.

use crate::domain::config::{COLUMNS, LedgerConfig};
use crate::domain::error::LedgerError;
use crate::domain::transaction::{Category, Transaction, format_money};
use crate::ports::ledger_port::LedgerPort;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct CsvLedger {
    path: PathBuf,
    date_format: String,
}

impl CsvLedger {
    pub fn new(path: PathBuf, date_format: impl Into<String>) -> Self {
        Self {
            path,
            date_format: date_format.into(),
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.csv_file.clone(), config.date_format.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_err(&self, what: impl std::fmt::Display) -> LedgerError {
        LedgerError::Storage {
            reason: format!("{}: {}", self.path.display(), what),
        }
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<Transaction, LedgerError> {
        let field = |idx: usize| {
            record
                .get(idx)
                .ok_or_else(|| self.storage_err(format!("line {line}: missing {} column", COLUMNS[idx])))
        };

        let date_str = field(0)?;
        let date = NaiveDate::parse_from_str(date_str.trim(), &self.date_format)
            .map_err(|e| self.storage_err(format!("line {line}: invalid date '{date_str}': {e}")))?;

        let amount_str = field(1)?;
        let amount = Decimal::from_str(amount_str.trim())
            .map_err(|e| self.storage_err(format!("line {line}: invalid amount '{amount_str}': {e}")))?;

        let category = Category::from_str(field(2)?)
            .map_err(|e| self.storage_err(format!("line {line}: {e}")))?;

        // Rows written by older tools may omit the trailing description.
        let description = record.get(3).unwrap_or_default().to_string();

        Ok(Transaction {
            date,
            amount,
            category,
            description,
        })
    }
}

impl LedgerPort for CsvLedger {
    fn initialize(&self) -> Result<(), LedgerError> {
        let needs_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(self.storage_err(e)),
        };
        if !needs_header {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_err(e))?;
        }
        let mut wtr = csv::Writer::from_path(&self.path).map_err(|e| self.storage_err(e))?;
        wtr.write_record(COLUMNS).map_err(|e| self.storage_err(e))?;
        wtr.flush().map_err(|e| self.storage_err(e))?;
        log::info!("created ledger file {}", self.path.display());
        Ok(())
    }

    fn append(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.storage_err(e))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        let date = transaction.date.format(&self.date_format).to_string();
        wtr.write_record([
            date.as_str(),
            format_money(transaction.amount).as_str(),
            transaction.category.as_str(),
            transaction.description.as_str(),
        ])
        .map_err(|e| self.storage_err(e))?;
        wtr.flush().map_err(|e| self.storage_err(e))?;
        log::debug!(
            "appended {} {} on {} to {}",
            transaction.category,
            transaction.amount,
            date,
            self.path.display()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_err(e))?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| self.storage_err(format!("CSV parse error: {e}")))?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if !headers.iter().map(str::trim).eq(COLUMNS) {
            return Err(self.storage_err(format!(
                "line 1: expected header '{}', found '{}'",
                COLUMNS.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }
        let mut transactions = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| self.storage_err(format!("CSV parse error: {e}")))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            transactions.push(self.parse_record(&record, line)?);
        }

        log::debug!(
            "loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FMT: &str = "%d-%m-%Y";

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup() -> (TempDir, CsvLedger) {
        let dir = TempDir::new().unwrap();
        let ledger = CsvLedger::new(dir.path().join("finance_data.csv"), FMT);
        (dir, ledger)
    }

    fn tx(date: NaiveDate, amount: Decimal, category: Category, description: &str) -> Transaction {
        Transaction {
            date,
            amount,
            category,
            description: description.to_string(),
        }
    }

    #[test]
    fn initialize_creates_header_only_file() {
        let (_dir, ledger) = setup();
        ledger.initialize().unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(content, "date,amount,category,description\n");
        assert!(ledger.load_all().unwrap().is_empty());
    }

    #[test]
    fn initialize_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let ledger = CsvLedger::new(dir.path().join("nested/deeper/ledger.csv"), FMT);
        ledger.initialize().unwrap();
        assert!(ledger.path().exists());
    }

    #[test]
    fn initialize_leaves_existing_data_alone() {
        let (_dir, ledger) = setup();
        let existing = "date,amount,category,description\n01-01-2024,10.00,Income,x\n";
        fs::write(ledger.path(), existing).unwrap();

        ledger.initialize().unwrap();
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), existing);
    }

    #[test]
    fn initialize_fills_zero_byte_file() {
        let (_dir, ledger) = setup();
        fs::write(ledger.path(), "").unwrap();
        ledger.initialize().unwrap();
        assert_eq!(
            fs::read_to_string(ledger.path()).unwrap(),
            "date,amount,category,description\n"
        );
    }

    #[test]
    fn append_writes_expected_row() {
        let (_dir, ledger) = setup();
        ledger.initialize().unwrap();
        ledger
            .append(&tx(d(2024, 1, 1), Decimal::from(100), Category::Income, "pay"))
            .unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            content,
            "date,amount,category,description\n01-01-2024,100.00,Income,pay\n"
        );
    }

    #[test]
    fn append_then_load_round_trips() {
        let (_dir, ledger) = setup();
        ledger.initialize().unwrap();
        let written = vec![
            tx(d(2024, 1, 1), Decimal::from(100), Category::Income, "pay"),
            tx(d(2024, 1, 3), Decimal::new(1999, 2), Category::Expense, "lunch, with \"friends\""),
            tx(d(2024, 1, 2), Decimal::new(5, 1), Category::Expense, ""),
        ];
        for t in &written {
            ledger.append(t).unwrap();
        }

        assert_eq!(ledger.load_all().unwrap(), written);
    }

    #[test]
    fn fetch_range_filters_inclusive() {
        let (_dir, ledger) = setup();
        ledger.initialize().unwrap();
        for day in 1..=5 {
            ledger
                .append(&tx(d(2024, 1, day), Decimal::from(day), Category::Expense, ""))
                .unwrap();
        }

        let rows = ledger.fetch_range(d(2024, 1, 2), d(2024, 1, 4)).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, d(2024, 1, 2));
        assert_eq!(rows[2].date, d(2024, 1, 4));
    }

    #[test]
    fn load_accepts_float_style_amounts() {
        let (_dir, ledger) = setup();
        fs::write(
            ledger.path(),
            "date,amount,category,description\n05-02-2024,100.0,Income,\n06-02-2024,3.5,Expense\n",
        )
        .unwrap();

        let rows = ledger.load_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount, Decimal::from(100));
        assert_eq!(rows[1].description, "");
    }

    #[test]
    fn load_reports_malformed_line() {
        let (_dir, ledger) = setup();
        fs::write(
            ledger.path(),
            "date,amount,category,description\n01-01-2024,10,Income,ok\n2024-01-02,10,Income,bad\n",
        )
        .unwrap();

        let err = ledger.load_all().unwrap_err();
        assert!(matches!(err, LedgerError::Storage { .. }));
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn load_rejects_missing_header() {
        let (_dir, ledger) = setup();
        fs::write(ledger.path(), "01-01-2024,10,Income,first\n02-01-2024,5,Expense,second\n").unwrap();
        ledger.initialize().unwrap();

        let err = ledger.load_all().unwrap_err();
        assert!(matches!(err, LedgerError::Storage { .. }));
        assert!(err.to_string().contains("line 1"), "{err}");
        assert!(err.to_string().contains("01-01-2024,10,Income,first"), "{err}");
    }

    #[test]
    fn load_rejects_reordered_header() {
        let (_dir, ledger) = setup();
        fs::write(
            ledger.path(),
            "amount,date,category,description\n10,01-01-2024,Income,\n",
        )
        .unwrap();

        let err = ledger.load_all().unwrap_err();
        assert!(err.to_string().contains("expected header 'date,amount,category,description'"), "{err}");
    }

    #[test]
    fn load_empty_file_has_no_rows() {
        let (_dir, ledger) = setup();
        fs::write(ledger.path(), "").unwrap();
        assert!(ledger.load_all().unwrap().is_empty());
    }

    #[test]
    fn load_rejects_unknown_category() {
        let (_dir, ledger) = setup();
        fs::write(
            ledger.path(),
            "date,amount,category,description\n01-01-2024,10,Transfer,\n",
        )
        .unwrap();
        assert!(ledger.load_all().is_err());
    }

    #[test]
    fn load_missing_file_is_error() {
        let (_dir, ledger) = setup();
        assert!(matches!(
            ledger.load_all(),
            Err(LedgerError::Storage { .. })
        ));
    }

    #[test]
    fn append_without_initialize_is_error() {
        let (_dir, ledger) = setup();
        let result = ledger.append(&tx(d(2024, 1, 1), Decimal::ONE, Category::Income, ""));
        assert!(result.is_err());
    }
}
