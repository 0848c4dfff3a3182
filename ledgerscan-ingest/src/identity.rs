use ledgerscan_core::AccountIdentity;

use crate::patterns::account_identity_re;

/// Number of leading raw lines searched for the account number.
/// Deeper lines carry references and amounts that can look like one.
pub const IDENTITY_WINDOW: usize = 3;

/// First account number found in the header window of a raw line stream.
pub fn extract_account_identity<S: AsRef<str>>(lines: &[S]) -> Option<AccountIdentity> {
    lines.iter().take(IDENTITY_WINDOW).find_map(|line| {
        account_identity_re()
            .find(line.as_ref())
            .map(|m| AccountIdentity::new(m.as_str()))
    })
}
