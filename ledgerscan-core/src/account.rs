//! Account identity and cross-document reconciliation

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Account number as printed in a statement header (e.g. `01-02-03-123456-7`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentity(String);

impl AccountIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of comparing identities across a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdentityVerdict {
    /// Every document that carried an identity carried this one
    Single { identity: AccountIdentity },
    /// More than one distinct identity was found
    Mismatch { identities: Vec<AccountIdentity> },
    /// No document carried an identity
    Unknown,
}

/// Per-document identities, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdentityReport {
    pub identities: Vec<Option<AccountIdentity>>,
}

impl IdentityReport {
    pub fn new(identities: Vec<Option<AccountIdentity>>) -> Self {
        Self { identities }
    }

    /// Distinct non-missing identities
    pub fn distinct(&self) -> BTreeSet<&AccountIdentity> {
        self.identities.iter().flatten().collect()
    }

    /// More than one distinct non-missing identity across the batch.
    /// Missing identities never count toward a mismatch.
    pub fn is_mismatch(&self) -> bool {
        self.distinct().len() > 1
    }

    /// Documents where no identity was found in the header window
    pub fn missing_count(&self) -> usize {
        self.identities.iter().filter(|id| id.is_none()).count()
    }

    pub fn verdict(&self) -> IdentityVerdict {
        let mut distinct: Vec<AccountIdentity> = self.distinct().into_iter().cloned().collect();
        match distinct.len() {
            0 => IdentityVerdict::Unknown,
            1 => IdentityVerdict::Single {
                identity: distinct.remove(0),
            },
            _ => IdentityVerdict::Mismatch {
                identities: distinct,
            },
        }
    }
}
