//! Typed transaction rows produced by statement ingestion

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single normalized statement row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Posting date; `None` when the statement's date token could not be parsed
    pub date: Option<NaiveDate>,
    /// Description fragments joined with single spaces (may be empty)
    pub description: String,
    /// Positive = credit, negative = debit
    pub amount: f64,
    /// Running account balance after this transaction
    pub balance: f64,
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        date: Option<NaiveDate>,
        description: impl Into<String>,
        amount: f64,
        balance: f64,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            balance,
        }
    }

    /// Returns true if money came into the account (strictly positive amount)
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    /// Returns true if money left the account (strictly negative amount)
    pub fn is_debit(&self) -> bool {
        self.amount < 0.0
    }

    /// Calendar month of the posting date, if the date parsed
    pub fn month_key(&self) -> Option<MonthKey> {
        self.date.map(MonthKey::from_date)
    }

    /// Uppercase substring test against the description.
    ///
    /// `marker` is expected in uppercase already (e.g. `"ATM"`).
    pub fn mentions(&self, marker: &str) -> bool {
        self.description.to_uppercase().contains(marker)
    }
}

/// A (year, month) bucket used for monthly grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Ordered statement rows, kept in the order their date anchors were encountered.
///
/// Tables from several documents are concatenated in submission order without
/// re-sorting or de-duplication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    /// Concatenate tables in the order given
    pub fn concat(tables: impl IntoIterator<Item = TransactionTable>) -> Self {
        let mut out = Self::new();
        for table in tables {
            out.append(table);
        }
        out
    }

    pub fn push(&mut self, txn: Transaction) {
        self.rows.push(txn);
    }

    /// Move all rows of `other` to the end of this table
    pub fn append(&mut self, mut other: TransactionTable) {
        self.rows.append(&mut other.rows);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Transaction> {
        self.rows
    }

    /// Rows whose date token failed to parse
    pub fn undated_count(&self) -> usize {
        self.rows.iter().filter(|t| t.date.is_none()).count()
    }
}

impl FromIterator<Transaction> for TransactionTable {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TransactionTable {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for TransactionTable {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
