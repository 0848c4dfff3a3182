//! Description markers: substring tests against uppercased descriptions.

use ledgerscan_core::TransactionTable;
use serde::Serialize;

/// Cash-machine withdrawals and deposits
pub const ATM_MARKER: &str = "ATM";
/// Peer-to-peer mobile payments
pub const PEER_PAYMENT_MARKER: &str = "YAPPY";

/// True if any description contains `marker`
pub fn has_marker(table: &TransactionTable, marker: &str) -> bool {
    table.iter().any(|t| t.mentions(marker))
}

/// Marked rows split by the sign of the amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignedCounts {
    /// amount > 0
    pub incoming: usize,
    /// amount < 0
    pub outgoing: usize,
}

/// Count rows mentioning `marker`; zero amounts count toward neither side.
pub fn marker_counts(table: &TransactionTable, marker: &str) -> SignedCounts {
    table
        .iter()
        .filter(|t| t.mentions(marker))
        .fold(SignedCounts::default(), |mut counts, t| {
            if t.is_credit() {
                counts.incoming += 1;
            } else if t.is_debit() {
                counts.outgoing += 1;
            }
            counts
        })
}

/// Marker tokens to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub atm: String,
    pub peer_payment: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            atm: ATM_MARKER.to_string(),
            peer_payment: PEER_PAYMENT_MARKER.to_string(),
        }
    }
}

impl Markers {
    /// Markers are compared against uppercased descriptions, so they are
    /// uppercased here too.
    pub fn new(atm: &str, peer_payment: &str) -> Self {
        Self {
            atm: atm.to_uppercase(),
            peer_payment: peer_payment.to_uppercase(),
        }
    }

    pub fn summarize(&self, table: &TransactionTable) -> MarkerSummary {
        MarkerSummary {
            atm_marker: self.atm.clone(),
            has_atm: has_marker(table, &self.atm),
            peer_payment_marker: self.peer_payment.clone(),
            peer_payments: marker_counts(table, &self.peer_payment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSummary {
    pub atm_marker: String,
    pub has_atm: bool,
    pub peer_payment_marker: String,
    pub peer_payments: SignedCounts,
}
