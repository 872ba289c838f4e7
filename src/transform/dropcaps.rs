//! Drop-cap removal.
//!
//! Decorative paragraph initials arrive as a separate oversized single-char
//! span at the start of a line. They carry no content of their own once the
//! paragraph text repeats the letter at body size, so they are stripped
//! before any classification runs.

use crate::model::PageText;

/// A leading span must be at least this much larger than its neighbor.
const DROP_CAP_RATIO: f32 = 1.6;

/// Strip oversized single-character leading spans from every line.
pub fn strip_drop_caps(page: &mut PageText) {
    for line in &mut page.lines {
        if line.spans.len() < 2 {
            continue;
        }
        let first = &line.spans[0];
        let second = &line.spans[1];
        if first.text.trim().chars().count() == 1
            && first.font_size >= second.font_size * DROP_CAP_RATIO
        {
            line.spans.remove(0);
        }
    }
}
