//! Largest credits per calendar month.

use chrono::NaiveDate;
use ledgerscan_core::{MonthKey, Transaction, TransactionTable};
use serde::Serialize;
use std::collections::BTreeMap;

pub const TOP_CREDITS_PER_MONTH: usize = 4;

/// A selected credit with its month attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCredit {
    pub month: MonthKey,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

/// Selected credits, months ascending and amounts descending within a month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyTopCredits {
    rows: Vec<MonthlyCredit>,
}

impl MonthlyTopCredits {
    pub fn rows(&self) -> &[MonthlyCredit] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Months present, ascending
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.rows.iter().map(|r| r.month).collect();
        months.dedup();
        months
    }

    pub fn for_month(&self, month: MonthKey) -> impl Iterator<Item = &MonthlyCredit> {
        self.rows.iter().filter(move |r| r.month == month)
    }
}

/// The four largest credits of every month.
pub fn top_monthly_credits(table: &TransactionTable) -> MonthlyTopCredits {
    top_credits_per_month(table, TOP_CREDITS_PER_MONTH)
}

/// The `n` largest credits (amount > 0) of every month.
///
/// Rows without a date cannot be placed in a month and are skipped. Equal
/// amounts keep their table order.
pub fn top_credits_per_month(table: &TransactionTable, n: usize) -> MonthlyTopCredits {
    let mut groups: BTreeMap<MonthKey, Vec<(NaiveDate, &Transaction)>> = BTreeMap::new();
    for txn in table.iter().filter(|t| t.is_credit()) {
        if let Some(date) = txn.date {
            groups
                .entry(MonthKey::from_date(date))
                .or_default()
                .push((date, txn));
        }
    }

    let mut rows = Vec::new();
    for (month, mut items) in groups {
        // stable: ties stay in table order
        items.sort_by(|(_, a), (_, b)| b.amount.total_cmp(&a.amount));
        rows.extend(items.into_iter().take(n).map(|(date, txn)| MonthlyCredit {
            month,
            date,
            description: txn.description.clone(),
            amount: txn.amount,
        }));
    }

    MonthlyTopCredits { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(y: i32, m: u32, d: u32, desc: &str, amount: f64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d), desc, amount, 0.0)
    }

    fn sample() -> TransactionTable {
        TransactionTable::from_rows(vec![
            txn(2024, 2, 3, "FEB SMALL", 10.0),
            txn(2024, 1, 5, "JAN A", 100.0),
            txn(2024, 1, 6, "JAN B", 300.0),
            txn(2024, 1, 7, "JAN DEBIT", -900.0),
            txn(2024, 1, 8, "JAN C", 200.0),
            txn(2024, 1, 9, "JAN D", 50.0),
            txn(2024, 1, 10, "JAN E", 400.0),
            txn(2024, 1, 11, "JAN ZERO", 0.0),
            txn(2023, 12, 31, "DEC", 5.0),
            Transaction::new(None, "UNDATED", 10_000.0, 0.0),
        ])
    }

    #[test]
    fn test_top_four_per_month() {
        let top = top_monthly_credits(&sample());
        let jan = MonthKey { year: 2024, month: 1 };

        let jan_descs: Vec<_> = top.for_month(jan).map(|r| r.description.as_str()).collect();
        assert_eq!(jan_descs, vec!["JAN E", "JAN B", "JAN C", "JAN A"]);

        assert_eq!(
            top.months(),
            vec![
                MonthKey { year: 2023, month: 12 },
                jan,
                MonthKey { year: 2024, month: 2 },
            ]
        );
        assert_eq!(top.len(), 6);
    }

    #[test]
    fn test_no_excluded_credit_beats_the_smallest_kept() {
        let table = sample();
        let top = top_monthly_credits(&table);

        for month in top.months() {
            let kept: Vec<_> = top.for_month(month).collect();
            assert!(kept.len() <= TOP_CREDITS_PER_MONTH);
            let floor = kept.iter().map(|r| r.amount).fold(f64::INFINITY, f64::min);

            let kept_count = table
                .iter()
                .filter(|t| t.is_credit() && t.month_key() == Some(month))
                .filter(|t| t.amount > floor)
                .count();
            assert!(kept_count <= kept.len());
        }
    }

    #[test]
    fn test_ties_keep_table_order() {
        let table = TransactionTable::from_rows(vec![
            txn(2024, 3, 1, "FIRST", 50.0),
            txn(2024, 3, 2, "SECOND", 50.0),
            txn(2024, 3, 3, "THIRD", 50.0),
            txn(2024, 3, 4, "FOURTH", 50.0),
            txn(2024, 3, 5, "FIFTH", 50.0),
        ]);
        let top = top_monthly_credits(&table);
        let descs: Vec<_> = top.rows().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, vec!["FIRST", "SECOND", "THIRD", "FOURTH"]);
    }

    #[test]
    fn test_debits_and_undated_rows_are_ignored() {
        let table = TransactionTable::from_rows(vec![
            txn(2024, 4, 1, "DEBIT", -10.0),
            Transaction::new(None, "UNDATED", 10.0, 0.0),
        ]);
        assert!(top_monthly_credits(&table).is_empty());
    }

    #[test]
    fn test_custom_n() {
        let top = top_credits_per_month(&sample(), 1);
        let descs: Vec<_> = top.rows().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, vec!["DEC", "JAN E", "FEB SMALL"]);
    }

    #[test]
    fn test_serializes_with_month_key() {
        let top = top_monthly_credits(&sample());
        let json = serde_json::to_value(&top).unwrap();
        assert_eq!(json[0]["month"]["year"], 2023);
        assert_eq!(json[0]["date"], "2023-12-31");
    }
}
