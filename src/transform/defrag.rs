//! Orphan line defragmentation.
//!
//! Hard-wrapped paragraphs leave short leading fragments ("orphans") that
//! belong with the line after them. An orphan merges forward into the
//! following fragment; a trailing hyphen before a lowercase continuation is
//! dropped and the join is seamless (dehyphenation).

use crate::model::Line;

use super::lists::starts_with_marker;

/// A paragraph candidate: plain text plus its source lines.
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Accumulated text
    pub text: String,
    /// Source lines, in merge order
    pub lines: Vec<Line>,
}

impl Fragment {
    /// Wrap a single source line.
    pub fn from_line(line: Line) -> Self {
        Self {
            text: line.text().trim().to_string(),
            lines: vec![line],
        }
    }
}

/// Check whether a fragment is short enough and open-ended enough to merge.
pub fn is_orphan(text: &str, max_len: usize) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_len {
        return false;
    }
    !trimmed.ends_with(['.', '?', '!', ':', ';'])
}

/// Join an orphan with its continuation, dehyphenating when the orphan ends
/// with a hyphen and the continuation starts lowercase.
pub fn join(orphan: &str, next: &str) -> String {
    let orphan = orphan.trim_end();
    let next = next.trim_start();
    if orphan.ends_with('-') && next.chars().next().is_some_and(|c| c.is_lowercase()) {
        format!("{}{}", &orphan[..orphan.len() - 1], next)
    } else {
        format!("{} {}", orphan, next)
    }
}

/// Merge orphan fragments forward until none remain in the run.
///
/// An orphan never merges into a fragment that opens with a list marker;
/// those belong to a different structure even when they escaped list
/// classification.
pub fn defragment(fragments: Vec<Fragment>, max_len: usize) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::with_capacity(fragments.len());
    let mut iter = fragments.into_iter().peekable();

    while let Some(mut frag) = iter.next() {
        while is_orphan(&frag.text, max_len)
            && iter
                .peek()
                .is_some_and(|next| !starts_with_marker(&next.text))
        {
            if let Some(next) = iter.next() {
                frag.text = join(&frag.text, &next.text);
                frag.lines.extend(next.lines);
            }
        }
        out.push(frag);
    }

    out
}
