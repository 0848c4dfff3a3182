//! Line patterns for the `dd-mmm-yyyy` statement dialect.
//!
//! Each pattern is a named constant with a lazily compiled accessor so it can be
//! exercised on its own, apart from the scanner.

use regex::Regex;
use std::sync::OnceLock;

/// Row start: two-digit day, three-letter month, four-digit year, at line start.
///   `01-ene-2024`, `15-DIC-2023`
pub const DATE_ANCHOR: &str = r"(?i)^\d{2}-[a-z]{3}-\d{4}";

/// Signed amount followed by the running balance:
///   `-$1,250.00   $3,400.10`
///
/// Each token is an optional minus, a dollar sign, digits (optionally grouped by
/// thousands) and exactly two decimals.
pub const AMOUNT_BALANCE_PAIR: &str = concat!(
    r"(?P<amount>-?\$(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})",
    r"\s+",
    r"(?P<balance>-?\$(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2})"
);

/// Header account number: `01-02-03-123456-7`
pub const ACCOUNT_IDENTITY: &str = r"\d{2}-\d{2}-\d{2}-\d{6}-\d{1}";

pub fn date_anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_ANCHOR).expect("date anchor regex"))
}

pub fn amount_balance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AMOUNT_BALANCE_PAIR).expect("amount/balance regex"))
}

pub fn account_identity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ACCOUNT_IDENTITY).expect("account identity regex"))
}

/// A matched amount/balance pair and where it sits in the searched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountPair<'a> {
    pub amount: &'a str,
    pub balance: &'a str,
    /// Byte offset where the pair starts
    pub start: usize,
}

/// First amount/balance pair in `text`, if any
pub fn find_amount_pair(text: &str) -> Option<AmountPair<'_>> {
    let caps = amount_balance_re().captures(text)?;
    let whole = caps.get(0)?;
    Some(AmountPair {
        amount: caps.name("amount")?.as_str(),
        balance: caps.name("balance")?.as_str(),
        start: whole.start(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_anchor_matches_at_line_start_only() {
        let re = date_anchor_re();
        assert!(re.is_match("01-ene-2024 COMPRA"));
        assert!(re.is_match("31-DIC-2023"));
        assert!(re.is_match("07-Jan-2025 PAYROLL"));
        assert_eq!(re.find("02-feb-2024 PAGO").unwrap().as_str(), "02-feb-2024");

        assert!(!re.is_match("PAGO 02-feb-2024"));
        assert!(!re.is_match("2-feb-2024 PAGO"));
        assert!(!re.is_match("02-febr-2024"));
        assert!(!re.is_match("02-feb-24"));
        assert!(!re.is_match("02/02/2024"));
    }

    #[test]
    fn test_amount_pair_plain_and_grouped() {
        let pair = find_amount_pair("COMPRA SUPERMERCADO $50.00 $450.00").unwrap();
        assert_eq!(pair.amount, "$50.00");
        assert_eq!(pair.balance, "$450.00");
        assert_eq!(pair.start, "COMPRA SUPERMERCADO ".len());

        let pair = find_amount_pair("-$1,250.00    $12,400.10").unwrap();
        assert_eq!(pair.amount, "-$1,250.00");
        assert_eq!(pair.balance, "$12,400.10");
        assert_eq!(pair.start, 0);

        let pair = find_amount_pair("$1250.00 -$3.10").unwrap();
        assert_eq!(pair.amount, "$1250.00");
        assert_eq!(pair.balance, "-$3.10");
    }

    #[test]
    fn test_amount_pair_rejects_non_currency() {
        // single token
        assert!(find_amount_pair("TOTAL $50.00").is_none());
        // missing dollar sign
        assert!(find_amount_pair("REF 123.45 678.90").is_none());
        // wrong decimals
        assert!(find_amount_pair("$50.0 $450.00").is_none());
        assert!(find_amount_pair("$50 $450").is_none());
        // tokens not adjacent
        assert!(find_amount_pair("$50.00 SALDO $450.00").is_none());
    }

    #[test]
    fn test_account_identity_pattern() {
        let re = account_identity_re();
        assert_eq!(
            re.find("Cuenta: 01-02-03-123456-7 Titular").unwrap().as_str(),
            "01-02-03-123456-7"
        );
        assert!(!re.is_match("01-02-03-12345-7"));
        assert!(!re.is_match("01-02-123456-7"));
        assert!(!re.is_match("01/02/03/123456/7"));
    }
}
