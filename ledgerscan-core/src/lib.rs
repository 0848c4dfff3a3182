//! ledgerscan-core: typed statement rows and account identity reconciliation

pub mod account;
pub mod transaction;

pub use account::{AccountIdentity, IdentityReport, IdentityVerdict};
pub use transaction::{MonthKey, Transaction, TransactionTable};
