//! Per-document pipeline: pages -> lines -> raw rows -> typed table, plus the
//! header account number.

use ledgerscan_core::{AccountIdentity, IdentityReport, TransactionTable};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::identity::extract_account_identity;
use crate::normalize::normalize_records;
use crate::pages::{normalize_pages, raw_lines};
use crate::scanner::scan_lines;
use crate::source::PageSource;

/// Everything extracted from one source document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentExtraction {
    pub source_name: String,
    pub identity: Option<AccountIdentity>,
    pub table: TransactionTable,
    /// Rows the scanner emitted before amount/balance filtering
    pub scanned: usize,
    /// Why the document produced no text, when it could not be read
    pub unreadable: Option<String>,
}

impl DocumentExtraction {
    fn unreadable(source_name: String, reason: String) -> Self {
        Self {
            source_name,
            identity: None,
            table: TransactionTable::new(),
            scanned: 0,
            unreadable: Some(reason),
        }
    }

    pub fn is_readable(&self) -> bool {
        self.unreadable.is_none()
    }

    /// Scanned rows dropped for a missing or unparseable amount/balance
    pub fn dropped(&self) -> usize {
        self.scanned.saturating_sub(self.table.len())
    }
}

/// Run the whole pipeline over pages already in memory.
pub fn extract_pages<S: AsRef<str>>(source_name: &str, pages: &[S]) -> DocumentExtraction {
    let identity = extract_account_identity(&raw_lines(pages));
    if identity.is_none() {
        warn!(source = source_name, "no account number found in statement header");
    }

    let lines = normalize_pages(pages);
    let records = scan_lines(&lines);
    let table = normalize_records(&records);

    debug!(
        source = source_name,
        lines = lines.len(),
        scanned = records.len(),
        kept = table.len(),
        "scanned statement"
    );
    if table.is_empty() {
        info!(source = source_name, "no transactions found");
    }

    DocumentExtraction {
        source_name: source_name.to_string(),
        identity,
        table,
        scanned: records.len(),
        unreadable: None,
    }
}

/// Read a document and run the pipeline. A source that cannot be read yields an
/// empty extraction instead of an error so the rest of a batch carries on.
pub fn extract_document(source: &dyn PageSource) -> DocumentExtraction {
    let name = source.name();
    match source.pages() {
        Ok(pages) => extract_pages(&name, &pages),
        Err(err) => {
            warn!(source = %name, error = %err, "skipping unreadable document");
            DocumentExtraction::unreadable(name, err.to_string())
        }
    }
}

/// Extractions of a batch, in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchExtraction {
    pub documents: Vec<DocumentExtraction>,
}

impl BatchExtraction {
    pub fn new(documents: Vec<DocumentExtraction>) -> Self {
        Self { documents }
    }

    /// Process sources one after another
    pub fn extract<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn PageSource>,
    {
        Self::new(sources.into_iter().map(extract_document).collect())
    }

    /// All document tables concatenated in submission order
    pub fn combined_table(&self) -> TransactionTable {
        TransactionTable::concat(self.documents.iter().map(|doc| doc.table.clone()))
    }

    pub fn identity_report(&self) -> IdentityReport {
        IdentityReport::new(self.documents.iter().map(|doc| doc.identity.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{InMemoryPages, TextFile};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn fixture_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("statement.txt")
    }

    fn pages(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn test_single_line_scenario() {
        let doc = extract_pages("a", &pages("01-ene-2024 COMPRA SUPERMERCADO $50.00 $450.00"));
        assert_eq!(doc.table.len(), 1);

        let txn = &doc.table.rows()[0];
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(txn.description, "COMPRA SUPERMERCADO");
        assert_eq!(txn.amount, 50.00);
        assert_eq!(txn.balance, 450.00);
    }

    #[test]
    fn test_wrapped_scenario() {
        let doc = extract_pages("b", &pages("02-feb-2024 PAGO\nSERVICIOS VARIOS\n-$30.00 $420.00"));
        let txn = &doc.table.rows()[0];
        assert_eq!(txn.description, "PAGO SERVICIOS VARIOS");
        assert_eq!(txn.amount, -30.00);
        assert_eq!(txn.balance, 420.00);
    }

    #[test]
    fn test_row_without_pair_is_excluded() {
        let doc = extract_pages(
            "c",
            &pages("03-mar-2024 SIN MONTO\nDETALLE\n04-mar-2024 OK $1.00 $2.00\n05-mar-2024 FINAL"),
        );
        assert_eq!(doc.scanned, 3);
        assert_eq!(doc.table.len(), 1);
        assert_eq!(doc.dropped(), 2);
        assert_eq!(doc.table.rows()[0].description, "OK");
    }

    #[test]
    fn test_rerun_is_identical() {
        let text = std::fs::read_to_string(fixture_path()).unwrap();
        let first = extract_pages("f", &pages(&text));
        let second = extract_pages("f", &pages(&text));
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixture_statement() {
        let doc = extract_document(&TextFile::new(fixture_path()));
        assert!(doc.is_readable());
        assert_eq!(doc.identity.as_ref().map(|id| id.as_str()), Some("01-02-03-123456-7"));

        let descs: Vec<_> = doc.table.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(
            descs,
            vec![
                "SALDO ANTERIOR TRASLADO",
                "COMPRA SUPERMERCADO EL REY",
                "YAPPY DE MARIA PEREZ",
                "CAJERO ATM RETIRO SUCURSAL CENTRO",
                "PAGO SERVICIOS VARIOS",
                "YAPPY A CARLOS GOMEZ",
                "DEPOSITO PLANILLA ACME S.A.",
            ]
        );

        // one row has no amount/balance pair
        assert_eq!(doc.dropped(), 1);

        let atm = &doc.table.rows()[3];
        assert_eq!(atm.amount, -100.00);
        assert_eq!(atm.balance, 1_250.50);
        assert_eq!(atm.date, NaiveDate::from_ymd_opt(2024, 1, 15));

        let payroll = doc.table.rows().last().unwrap();
        assert_eq!(payroll.amount, 1_500.00);
        assert_eq!(payroll.date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_unreadable_document_degrades_to_empty() {
        let missing = TextFile::new("/no/such/file.txt");
        let good = InMemoryPages::new(
            "good",
            pages("Cuenta 09-09-09-999999-9\n01-ene-2024 X $1.00 $1.00"),
        );

        let batch = BatchExtraction::extract([&missing as &dyn PageSource, &good as &dyn PageSource]);
        assert_eq!(batch.documents.len(), 2);
        assert!(!batch.documents[0].is_readable());
        assert!(batch.documents[0].table.is_empty());
        assert_eq!(batch.combined_table().len(), 1);

        let report = batch.identity_report();
        assert_eq!(report.missing_count(), 1);
        assert!(!report.is_mismatch());
    }

    #[test]
    fn test_combined_table_keeps_submission_order() {
        let later = InMemoryPages::new("later", pages("01-feb-2024 B $1.00 $1.00"));
        let earlier = InMemoryPages::new("earlier", pages("01-ene-2024 A $1.00 $1.00"));

        let batch = BatchExtraction::extract([&later as &dyn PageSource, &earlier as &dyn PageSource]);
        let descs: Vec<_> = batch
            .combined_table()
            .iter()
            .map(|t| t.description.clone())
            .collect();
        assert_eq!(descs, vec!["B", "A"]);
    }
}
