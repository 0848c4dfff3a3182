//! Raw rows to typed rows: locale month names, dates and currency amounts.

use chrono::NaiveDate;
use ledgerscan_core::{Transaction, TransactionTable};
use tracing::{debug, warn};

use crate::types::RawRecord;

/// Statement month abbreviations and their `%b` equivalents
const MONTH_ABBREVIATIONS: [(&str, &str); 12] = [
    ("ene", "Jan"),
    ("feb", "Feb"),
    ("mar", "Mar"),
    ("abr", "Apr"),
    ("may", "May"),
    ("jun", "Jun"),
    ("jul", "Jul"),
    ("ago", "Aug"),
    ("sep", "Sep"),
    ("oct", "Oct"),
    ("nov", "Nov"),
    ("dic", "Dec"),
];

const DATE_FORMAT: &str = "%d-%b-%Y";

/// Lowercase the token and replace every month abbreviation it contains.
///
/// Replacement is by substring, not by whole field: an abbreviation anywhere in
/// the token is rewritten.
pub fn localize_date_token(token: &str) -> String {
    let mut out = token.to_lowercase();
    for (local, english) in MONTH_ABBREVIATIONS {
        if out.contains(local) {
            out = out.replace(local, english);
        }
    }
    out
}

/// Day-month-year date from a statement token such as `01-ene-2024`
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&localize_date_token(token), DATE_FORMAT).ok()
}

/// Currency string to number: `-$1,250.00` -> `-1250.0`
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Typed row, or `None` when amount or balance is missing or unparseable.
/// An unparseable date is kept as `None`.
pub fn normalize_record(record: &RawRecord) -> Option<Transaction> {
    let amount = record.amount.as_deref().and_then(parse_currency)?;
    let balance = record.balance.as_deref().and_then(parse_currency)?;

    Some(Transaction::new(
        parse_date_token(&record.date_token),
        record.description.clone(),
        amount,
        balance,
    ))
}

/// Normalize every raw row, dropping those without a numeric amount and balance.
pub fn normalize_records(records: &[RawRecord]) -> TransactionTable {
    let table: TransactionTable = records.iter().filter_map(normalize_record).collect();

    let dropped = records.len() - table.len();
    if dropped > 0 {
        debug!(dropped, "dropped rows without a parseable amount/balance pair");
    }

    let undated = table.undated_count();
    if undated > 0 {
        warn!(undated, "some dates could not be converted and were left empty");
    }

    table
}
