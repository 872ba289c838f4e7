//! List item detection.
//!
//! A line qualifies when it opens with a bullet glyph or a numbering
//! pattern. Nesting comes from clustering the left margins of the page's
//! list lines into ordered bands.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Line;

/// Left margins closer than this share a nesting band (points).
const INDENT_BAND_PT: f32 = 3.0;

/// Deepest nesting level emitted.
const MAX_INDENT_LEVEL: u8 = 5;

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[.)]\s+").unwrap());
static LETTERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z])\.\s+").unwrap());

/// A parsed list marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    /// Numbered/lettered marker vs bullet glyph
    pub ordered: bool,
    /// Item number for ordered markers (letters map a→1, b→2, …)
    pub number: Option<u32>,
    /// Text with the marker stripped
    pub rest: String,
}

/// Parse a leading list marker, if any.
pub fn parse_marker(text: &str) -> Option<ListMarker> {
    let s = text.trim_start();
    if s.is_empty() {
        return None;
    }

    let mut chars = s.chars();
    let first = chars.next().unwrap_or(' ');
    if matches!(first, '•' | '-' | '*' | '◦' | '–') {
        let rest = chars.as_str();
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Some(ListMarker {
                ordered: false,
                number: None,
                rest: rest.trim_start().to_string(),
            });
        }
        return None;
    }

    if let Some(caps) = NUMBERED.captures(s) {
        let number = caps[1].parse::<u32>().ok();
        return Some(ListMarker {
            ordered: true,
            number,
            rest: s[caps[0].len()..].to_string(),
        });
    }

    if let Some(caps) = LETTERED.captures(s) {
        let letter = caps[1].chars().next().unwrap_or('a');
        let number = Some(letter.to_ascii_lowercase() as u32 - 'a' as u32 + 1);
        return Some(ListMarker {
            ordered: true,
            number,
            rest: s[caps[0].len()..].to_string(),
        });
    }

    None
}

/// Check whether a line of text opens with a list marker.
pub fn starts_with_marker(text: &str) -> bool {
    parse_marker(text).is_some()
}

/// Map the left margins of a page's list lines to nesting levels.
///
/// Distinct x-offsets are clustered into bands [`INDENT_BAND_PT`] wide;
/// bands are numbered 0.. in ascending x order.
pub fn indent_levels(list_lines: &[&Line]) -> Vec<u8> {
    let mut offsets: Vec<f32> = list_lines.iter().map(|l| l.bbox().x0).collect();
    let mut sorted = offsets.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Band start positions, ascending.
    let mut bands: Vec<f32> = Vec::new();
    for x in sorted {
        match bands.last() {
            Some(&start) if x - start <= INDENT_BAND_PT => {}
            _ => bands.push(x),
        }
    }

    for x in offsets.iter_mut() {
        let level = bands
            .iter()
            .rposition(|&start| *x >= start - f32::EPSILON)
            .unwrap_or(0);
        *x = level.min(MAX_INDENT_LEVEL as usize) as f32;
    }

    offsets.into_iter().map(|lvl| lvl as u8).collect()
}
