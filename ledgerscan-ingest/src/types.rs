use serde::{Deserialize, Serialize};

/// Scanner output before type normalization.
///
/// `amount` and `balance` keep their statement spelling (e.g. `-$1,250.00`) and
/// stay `None` when no amount/balance pair was seen for the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date_token: String,
    pub description: String,
    pub amount: Option<String>,
    pub balance: Option<String>,
}

impl RawRecord {
    /// Both halves of the amount/balance pair were captured
    pub fn has_amounts(&self) -> bool {
        self.amount.is_some() && self.balance.is_some()
    }
}
