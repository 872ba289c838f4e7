//! Repeating header/footer detection and removal.
//!
//! Boilerplate lines recur at the same page edge with only the page number
//! changing, so matching happens on a normalized form: whitespace collapsed,
//! case folded, trailing digit runs stripped.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::PageText;

/// Fewer pages than this and the detector stays inert.
const MIN_PAGES: usize = 3;

static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-–—]*\d+[\s\-–—]*$").unwrap());

/// Detected repeating edge lines, in normalized form.
#[derive(Debug, Clone, Default)]
pub struct RepeatingEdges {
    /// Normalized header line, if one repeats
    pub header: Option<String>,
    /// Normalized footer line, if one repeats
    pub footer: Option<String>,
}

impl RepeatingEdges {
    /// Whether anything was detected.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.footer.is_none()
    }
}

/// Normalize a line for edge comparison.
///
/// NFKC fold, lowercase, collapse whitespace runs, strip a trailing digit
/// run and surrounding dashes so "Page 3" and "Page 17" compare equal.
pub fn normalize_edge_text(text: &str) -> String {
    let folded: String = text.nfkc().collect::<String>().to_lowercase();
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    TRAILING_NUMBER.replace(&collapsed, "").trim().to_string()
}

fn first_nonblank(page: &PageText) -> Option<String> {
    page.lines
        .iter()
        .find(|l| !l.is_blank())
        .map(|l| normalize_edge_text(&l.text()))
        .filter(|t| !t.is_empty())
}

fn last_nonblank(page: &PageText) -> Option<String> {
    page.lines
        .iter()
        .rev()
        .find(|l| !l.is_blank())
        .map(|l| normalize_edge_text(&l.text()))
        .filter(|t| !t.is_empty())
}

/// Find lines repeating at the top or bottom edge across pages.
///
/// A normalized string repeats if it occurs on more than half of the pages
/// at the same position. Documents below [`MIN_PAGES`] never activate the
/// detector.
pub fn detect_repeating_edges(pages: &[PageText]) -> RepeatingEdges {
    if pages.len() < MIN_PAGES {
        return RepeatingEdges::default();
    }

    let mut heads: HashMap<String, usize> = HashMap::new();
    let mut tails: HashMap<String, usize> = HashMap::new();

    for page in pages {
        if let Some(top) = first_nonblank(page) {
            *heads.entry(top).or_insert(0) += 1;
        }
        if let Some(bottom) = last_nonblank(page) {
            *tails.entry(bottom).or_insert(0) += 1;
        }
    }

    let majority = pages.len() / 2 + 1;
    let pick = |counts: HashMap<String, usize>| {
        counts
            .into_iter()
            .filter(|(_, count)| *count >= majority)
            .max_by(|(ta, ca), (tb, cb)| ca.cmp(cb).then(ta.cmp(tb).reverse()))
            .map(|(text, _)| text)
    };

    RepeatingEdges {
        header: pick(heads),
        footer: pick(tails),
    }
}

/// Drop lines matching the detected edges from a page.
///
/// Every line whose normalized form equals the detected header or footer is
/// removed, not only the outermost one, so a header spilling onto two lines
/// of boilerplate is still caught page by page.
pub fn remove_edges(page: &mut PageText, edges: &RepeatingEdges) {
    if edges.is_empty() {
        return;
    }
    page.lines.retain(|line| {
        let normalized = normalize_edge_text(&line.text());
        if normalized.is_empty() {
            return true;
        }
        if edges.header.as_deref() == Some(normalized.as_str()) {
            return false;
        }
        edges.footer.as_deref() != Some(normalized.as_str())
    });
}
