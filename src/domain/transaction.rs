//! Transaction record and category.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Whether a transaction brings money in or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// Parse the single-letter prompt code: `I` or `E`, any case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "I" => Some(Category::Income),
            "E" => Some(Category::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Category::Income),
            "expense" => Ok(Category::Expense),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
}

impl Transaction {
    /// Amount with exactly two fractional digits, as stored and displayed.
    pub fn amount_display(&self) -> String {
        format_money(self.amount)
    }

    /// Signed contribution to net savings.
    pub fn signed_amount(&self) -> Decimal {
        match self.category {
            Category::Income => self.amount,
            Category::Expense => -self.amount,
        }
    }
}

/// Render a decimal with exactly two fractional digits.
pub fn format_money(value: Decimal) -> String {
    let mut v = value.round_dp(2);
    v.rescale(2);
    v.to_string()
}
