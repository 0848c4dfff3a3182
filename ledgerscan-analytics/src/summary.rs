//! Batch summary over the combined table of all submitted statements.

use chrono::NaiveDate;
use ledgerscan_core::{IdentityReport, IdentityVerdict, TransactionTable};
use serde::Serialize;
use tracing::warn;

use crate::markers::{MarkerSummary, Markers};
use crate::monthly::{top_monthly_credits, MonthlyTopCredits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Earliest and latest parsed dates; `None` when no row has a date
pub fn date_range(table: &TransactionTable) -> Option<DateRange> {
    let mut dates = table.iter().filter_map(|t| t.date);
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange { start, end })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub transactions: usize,
    /// Rows kept with an unparseable date
    pub undated: usize,
    pub date_range: Option<DateRange>,
    pub identities: IdentityReport,
    pub identity: IdentityVerdict,
    pub markers: MarkerSummary,
    pub top_credits: MonthlyTopCredits,
}

impl BatchSummary {
    pub fn build(table: &TransactionTable, identities: IdentityReport, markers: &Markers) -> Self {
        let identity = identities.verdict();
        if let IdentityVerdict::Mismatch { identities: ids } = &identity {
            warn!(accounts = ids.len(), "statements belong to different accounts");
        }

        Self {
            transactions: table.len(),
            undated: table.undated_count(),
            date_range: date_range(table),
            identity,
            identities,
            markers: markers.summarize(table),
            top_credits: top_monthly_credits(table),
        }
    }

    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self.identity, IdentityVerdict::Mismatch { .. })
    }

    /// Conditions a caller should show to the user. None of them stop a run.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();

        if let IdentityVerdict::Mismatch { identities } = &self.identity {
            let list: Vec<&str> = identities.iter().map(|id| id.as_str()).collect();
            out.push(format!("different accounts: {}", list.join(", ")));
        }

        let missing = self.identities.missing_count();
        if missing > 0 {
            out.push(format!(
                "{} of {} document(s) have no account number in the header",
                missing,
                self.identities.identities.len()
            ));
        }

        if self.transactions == 0 {
            out.push("no transactions found".to_string());
        }

        if self.undated > 0 {
            out.push(format!(
                "{} transaction(s) have dates that could not be converted",
                self.undated
            ));
        }

        out
    }
}
