//! ledgerscan-ingest: statement page sources and the `dd-mmm-yyyy` line-scanning parser.

pub mod error;
pub mod identity;
pub mod normalize;
pub mod pages;
pub mod patterns;
pub mod pipeline;
pub mod scanner;
pub mod source;
pub mod types;

pub use error::IngestError;
pub use identity::extract_account_identity;
pub use normalize::normalize_records;
pub use pages::{normalize_pages, raw_lines};
pub use pipeline::{extract_document, extract_pages, BatchExtraction, DocumentExtraction};
pub use scanner::{scan_lines, LineScanner};
pub use source::{source_for_path, InMemoryPages, PageSource, PdfToText, TextFile};
pub use types::RawRecord;
