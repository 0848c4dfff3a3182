//! Page text to line stream.

/// Raw line stream of a document: every non-empty page, in order, split on `\n`.
///
/// Lines are not trimmed and blank lines are kept; the account-identity header
/// window is measured against this stream.
pub fn raw_lines<S: AsRef<str>>(pages: &[S]) -> Vec<&str> {
    pages
        .iter()
        .map(|page| page.as_ref())
        .filter(|page| !page.is_empty())
        .flat_map(|page| page.split('\n'))
        .collect()
}

/// Scanner input: trimmed, non-empty lines from all pages, page boundaries dropped.
pub fn normalize_pages<S: AsRef<str>>(pages: &[S]) -> Vec<&str> {
    raw_lines(pages)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
