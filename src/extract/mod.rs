//! Mid-rate extraction from bulletin text.
//!
//! RBZ bulletins list each currency code as a block header followed by
//! several numeric columns (buy, mid, sell). The scanner walks a page's text
//! line by line: an exact label match opens a block, numeric lines
//! accumulate, and the last number seen before the block ends is taken as
//! the mid-rate. Exact label equality is deliberate; anything fuzzier starts
//! matching currency codes embedded in footnotes.

use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Parse a sign-less decimal: digits with at most one point, nothing else.
///
/// Deliberately narrower than `f64::from_str`, which would also accept
/// signs, exponents and `inf`/`NaN`; none of those belong in a rate column.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let mut digits = 0usize;
    let mut seen_point = false;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_point => seen_point = true,
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }
    s.parse().ok()
}

/// Scan `lines` for a block headed by a line exactly equal to `label`, and
/// return the last number collected before that block ends.
///
/// Two-state machine: searching for the label line, then collecting
/// candidate numbers until a non-empty, non-numeric line closes the block.
/// A label line with nothing numeric under it is a false positive; the
/// scanner drops back to searching and keeps going. All state is local, so
/// the function is re-entrant and one page's scan cannot leak into another.
pub fn scan_lines<'a, I>(lines: I, label: &str) -> Option<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut in_block = false;
    let mut candidates: Vec<f64> = Vec::new();

    for raw in lines {
        let line = raw.trim();
        if line == label {
            in_block = true;
            candidates.clear();
            continue;
        }
        if !in_block || line.is_empty() {
            continue;
        }
        match parse_decimal(line) {
            Some(value) => candidates.push(value),
            None if candidates.is_empty() => in_block = false,
            // block closed with numbers in hand; fall through to finalize
            None => break,
        }
    }

    // single exit for both "block closed" and "input exhausted mid-block"
    if in_block {
        candidates.last().copied()
    } else {
        None
    }
}

/// Extract the rate for `label` from the bulletin PDF at `path`.
///
/// Pages are scanned in document order and the first page yielding a value
/// short-circuits the rest. `Ok(None)` means the document was readable but
/// carried no labelled value; unreadable documents are errors for the
/// caller to log and skip.
pub fn extract_rate(path: &Path, label: &str) -> Result<Option<f64>> {
    let doc = Document::load(path)
        .with_context(|| format!("loading bulletin {}", path.display()))?;

    for (page_num, _object_id) in doc.get_pages() {
        let text = doc
            .extract_text(&[page_num])
            .with_context(|| format!("extracting text from page {}", page_num))?;
        if let Some(rate) = scan_lines(text.lines(), label) {
            debug!(page = page_num, rate, "found labelled rate");
            return Ok(Some(rate));
        }
    }
    Ok(None)
}
