//! Heading classification.
//!
//! A line becomes a heading either because its dominant font size lands in
//! one of the document's heading buckets, or (optionally) because it is a
//! short all-caps line at body size. When both rules fire, the size-derived
//! level wins if it is more prominent.

use crate::model::Line;

use super::stats::FontStats;

/// All-caps promotion only applies up to this many characters.
const CAPS_MAX_LEN: usize = 80;

/// Minimum share of uppercase letters for caps promotion.
const CAPS_RATIO: f32 = 0.7;

/// Level assigned to caps-promoted headings.
const CAPS_LEVEL: u8 = 2;

/// Classify one line, returning its heading level if any.
pub fn heading_level(line: &Line, stats: &FontStats, caps_to_headings: bool) -> Option<u8> {
    let by_size = stats.level_for_size(line.font_size());
    if !caps_to_headings {
        return by_size;
    }
    let by_caps = caps_level(&line.text());
    match (by_size, by_caps) {
        (Some(size), Some(caps)) => Some(size.min(caps)),
        (Some(size), None) => Some(size),
        (None, caps) => caps,
    }
}

/// Caps-promotion rule: short line, letters present, mostly uppercase.
fn caps_level(text: &str) -> Option<u8> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > CAPS_MAX_LEN {
        return None;
    }
    let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return None;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    if upper as f32 / letters.len() as f32 >= CAPS_RATIO {
        Some(CAPS_LEVEL)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageText, Span};

    fn stats() -> FontStats {
        let page = PageText::new(
            0,
            vec![
                Line::new(vec![Span::new("x".repeat(500), 11.0)]),
                Line::new(vec![Span::new("x".repeat(20), 18.0)]),
                Line::new(vec![Span::new("x".repeat(10), 24.0)]),
            ],
        );
        FontStats::compute(&[page], 1.15)
    }

    fn line(text: &str, size: f32) -> Line {
        Line::new(vec![Span::new(text, size)])
    }

    #[test]
    fn test_size_derived_levels() {
        let stats = stats();
        assert_eq!(heading_level(&line("Title", 24.0), &stats, false), Some(1));
        assert_eq!(heading_level(&line("Section", 18.0), &stats, false), Some(2));
        assert_eq!(heading_level(&line("Body text", 11.0), &stats, false), None);
    }

    #[test]
    fn test_caps_promotion() {
        let stats = stats();
        assert_eq!(
            heading_level(&line("INTRODUCTION", 11.0), &stats, true),
            Some(2)
        );
        assert_eq!(heading_level(&line("INTRODUCTION", 11.0), &stats, false), None);
    }

    #[test]
    fn test_size_wins_when_more_prominent() {
        let stats = stats();
        // 24pt caps line: size says 1, caps says 2, level 1 wins.
        assert_eq!(heading_level(&line("OVERVIEW", 24.0), &stats, true), Some(1));
    }

    #[test]
    fn test_caps_gates() {
        let stats = stats();
        let long = "A".repeat(81);
        assert_eq!(heading_level(&line(&long, 11.0), &stats, true), None);
        assert_eq!(heading_level(&line("1234 5678", 11.0), &stats, true), None);
        assert_eq!(
            heading_level(&line("Mixed Case Line", 11.0), &stats, true),
            None
        );
    }
}
