//! Page text producers.
//!
//! The scanner only needs "an ordered list of strings, one per page". These
//! sources provide that from memory, from a plain-text dump, or from a PDF via
//! the external `pdftotext` tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Anything that can hand back the text of a document, page by page.
/// Empty strings are allowed for blank or unextractable pages.
pub trait PageSource {
    /// Label used in logs and reports
    fn name(&self) -> String;

    fn pages(&self) -> Result<Vec<String>>;
}

/// Split a form-feed separated text dump into pages, dropping trailing blank pages.
pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

/// Pages already held by the caller
#[derive(Debug, Clone)]
pub struct InMemoryPages {
    name: String,
    pages: Vec<String>,
}

impl InMemoryPages {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }
}

impl PageSource for InMemoryPages {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn pages(&self) -> Result<Vec<String>> {
        Ok(self.pages.clone())
    }
}

/// UTF-8 text dump, pages separated by form feeds
#[derive(Debug, Clone)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for TextFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn pages(&self) -> Result<Vec<String>> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| IngestError::unreadable(self.name(), e))?;
        Ok(split_pages(&raw))
    }
}

/// PDF rendered to text by `pdftotext -enc UTF-8 <file> -`
#[derive(Debug, Clone)]
pub struct PdfToText {
    path: PathBuf,
    command: String,
}

impl PdfToText {
    pub fn new(path: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            command: command.into(),
        }
    }
}

impl PageSource for PdfToText {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn pages(&self) -> Result<Vec<String>> {
        let output = Command::new(&self.command)
            .arg("-enc")
            .arg("UTF-8")
            .arg(&self.path)
            .arg("-")
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => IngestError::ToolUnavailable {
                    tool: self.command.clone(),
                },
                _ => IngestError::unreadable(self.name(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IngestError::unreadable(
                self.name(),
                format!("{} exited with {}: {}", self.command, output.status, stderr.trim()),
            ));
        }

        let pages = split_pages(&String::from_utf8_lossy(&output.stdout));
        debug!(source = %self.name(), pages = pages.len(), "extracted page text");
        Ok(pages)
    }
}

/// `PdfToText` for `.pdf` files, `TextFile` for anything else.
pub fn source_for_path(path: &Path, pdftotext: &str) -> Box<dyn PageSource + Send + Sync> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfToText::new(path, pdftotext))
    } else {
        Box::new(TextFile::new(path))
    }
}
