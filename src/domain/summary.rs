//! Date-range filtering, totals and the daily series used for plotting.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::transaction::{Category, Transaction};

/// Transactions dated within `[start, end]`, in their original order.
pub fn filter_by_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

impl Summary {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        for t in transactions {
            match t.category {
                Category::Income => total_income += t.amount,
                Category::Expense => total_expense += t.amount,
            }
        }
        Self {
            total_income,
            total_expense,
            net: transactions.iter().map(Transaction::signed_amount).sum(),
            count: transactions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Income and expense totals for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Per-day totals over the dates that actually carry transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for t in transactions {
            let entry = by_day
                .entry(t.date)
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            match t.category {
                Category::Income => entry.0 += t.amount,
                Category::Expense => entry.1 += t.amount,
            }
        }
        let points = by_day
            .into_iter()
            .map(|(date, (income, expense))| DailyPoint {
                date,
                income,
                expense,
            })
            .collect();
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Largest single-day value across both series.
    pub fn max_value(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.income.max(p.expense))
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}
