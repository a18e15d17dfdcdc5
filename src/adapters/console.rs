//! Line-based console prompts with bounded retry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

use crate::domain::error::LedgerError;
use crate::domain::transaction::Category;
use crate::domain::validation::{parse_amount, parse_category, parse_date, parse_description};

pub const AMOUNT_PROMPT: &str = "Enter the amount: ";
pub const CATEGORY_PROMPT: &str = "Enter the category ('I' for Income or 'E' for Expense): ";
pub const DESCRIPTION_PROMPT: &str = "Enter a description (optional): ";

pub struct Console<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
    date_format: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32, date_format: impl Into<String>) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
            date_format: date_format.into(),
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: &str) -> Result<(), LedgerError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Show `prompt` and read one line without its line terminator.
    pub fn prompt_line(&mut self, prompt: &str) -> Result<String, LedgerError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(LedgerError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Ask until `parse` accepts the answer, at most `max_attempts` times.
    ///
    /// Validation failures are printed and retried; any other error is
    /// returned immediately.
    pub fn prompt_until_valid<T, F>(
        &mut self,
        prompt: &str,
        field: &str,
        parse: F,
    ) -> Result<T, LedgerError>
    where
        F: Fn(&str) -> Result<T, LedgerError>,
    {
        for _ in 0..self.max_attempts {
            let answer = self.prompt_line(prompt)?;
            match parse(answer.as_str()) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_validation() => self.say(&e.to_string())?,
                Err(e) => return Err(e),
            }
        }
        log::warn!("giving up on {field} after {} attempts", self.max_attempts);
        Err(LedgerError::RetriesExhausted {
            field: field.to_string(),
            attempts: self.max_attempts,
        })
    }

    pub fn prompt_date(
        &mut self,
        prompt: &str,
        default_today: Option<NaiveDate>,
    ) -> Result<NaiveDate, LedgerError> {
        let format = self.date_format.clone();
        self.prompt_until_valid(prompt, "date", |s| parse_date(s, &format, default_today))
    }

    pub fn prompt_amount(&mut self) -> Result<Decimal, LedgerError> {
        self.prompt_until_valid(AMOUNT_PROMPT, "amount", parse_amount)
    }

    pub fn prompt_category(&mut self) -> Result<Category, LedgerError> {
        self.prompt_until_valid(CATEGORY_PROMPT, "category", parse_category)
    }

    pub fn prompt_description(&mut self) -> Result<String, LedgerError> {
        Ok(parse_description(&self.prompt_line(DESCRIPTION_PROMPT)?))
    }

    /// Yes/no question; only `y` or `yes` (any case) count as yes.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, LedgerError> {
        let answer = self.prompt_line(prompt)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}
