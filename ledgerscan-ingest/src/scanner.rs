//! Line scanner for `dd-mmm-yyyy` statements.
//!
//! Expected text after page extraction (descriptions may wrap, and the amount /
//! balance pair may sit on the date line or on a later line):
//!   01-ene-2024 COMPRA SUPERMERCADO $50.00 $450.00
//!   02-feb-2024 PAGO
//!   SERVICIOS VARIOS
//!   -$30.00 $420.00
//!
//! A row starts at every date anchor and runs until the next anchor or the end
//! of the stream. Rows are emitted even when no amount/balance pair was seen;
//! dropping them is left to type normalization.

use crate::patterns::{date_anchor_re, find_amount_pair};
use crate::types::RawRecord;

/// Row being assembled between two date anchors
#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    date_token: String,
    fragments: Vec<String>,
    amount: Option<String>,
    balance: Option<String>,
}

impl Draft {
    fn new(date_token: &str) -> Self {
        Self {
            date_token: date_token.to_string(),
            fragments: Vec::new(),
            amount: None,
            balance: None,
        }
    }

    fn set_pair(&mut self, amount: &str, balance: &str) {
        self.amount = Some(amount.to_string());
        self.balance = Some(balance.to_string());
    }

    fn finish(self) -> RawRecord {
        RawRecord {
            date_token: self.date_token,
            description: self.fragments.join(" ").trim().to_string(),
            amount: self.amount,
            balance: self.balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    NoActiveRecord,
    Accumulating(Draft),
}

/// Push-style scanner: feed lines in order, then call [`LineScanner::finish`].
#[derive(Debug)]
pub struct LineScanner {
    state: ScanState,
    records: Vec<RawRecord>,
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LineScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::NoActiveRecord,
            records: Vec::new(),
        }
    }

    /// True while a row is open and waiting for more lines
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, ScanState::Accumulating(_))
    }

    /// Rows finalized so far
    pub fn emitted(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn feed(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if let Some(anchor) = date_anchor_re().find(line) {
            self.close_draft();

            let mut draft = Draft::new(anchor.as_str());
            let rest = line[anchor.end()..].trim();
            match find_amount_pair(rest) {
                Some(pair) => {
                    draft.fragments.push(rest[..pair.start].trim().to_string());
                    draft.set_pair(pair.amount, pair.balance);
                }
                None => draft.fragments.push(rest.to_string()),
            }
            self.state = ScanState::Accumulating(draft);
            return;
        }

        match &mut self.state {
            // preamble, page headers and footers outside any row
            ScanState::NoActiveRecord => {}
            ScanState::Accumulating(draft) => match find_amount_pair(line) {
                Some(pair) => draft.set_pair(pair.amount, pair.balance),
                None => draft.fragments.push(line.to_string()),
            },
        }
    }

    /// Close any open row and return every row in encounter order
    pub fn finish(mut self) -> Vec<RawRecord> {
        self.close_draft();
        self.records
    }

    fn close_draft(&mut self) {
        if let ScanState::Accumulating(draft) =
            std::mem::replace(&mut self.state, ScanState::NoActiveRecord)
        {
            self.records.push(draft.finish());
        }
    }
}

/// Scan a whole line stream into raw rows.
pub fn scan_lines<I, S>(lines: I) -> Vec<RawRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = LineScanner::new();
    for line in lines {
        scanner.feed(line.as_ref());
    }
    scanner.finish()
}
