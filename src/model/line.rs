//! Text spans and baseline-grouped lines.
//!
//! These are the raw primitives produced by extraction. They are treated as
//! immutable input by every transform stage: stages build new blocks around
//! them but never rewrite span content.

use serde::{Deserialize, Serialize};

use super::geometry::BBox;

/// A minimal styled text run sharing font attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font is bold
    pub bold: bool,
    /// Whether the font is italic
    pub italic: bool,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Bounding box in page coordinates
    pub bbox: BBox,
    /// Zero-based index of the page this span belongs to
    pub page_index: usize,
}

impl Span {
    /// Create a new span with default style and geometry.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            italic: false,
            font_name: String::new(),
            bbox: BBox::zero(),
            page_index: 0,
        }
    }

    /// Set the bounding box and return self.
    pub fn at(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the font name and return self.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Mark the span bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the span italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the page index and return self.
    pub fn on_page(mut self, index: usize) -> Self {
        self.page_index = index;
        self
    }
}

/// An ordered sequence of spans sharing a baseline.
///
/// Spans are kept sorted left-to-right; the line's box is the union of its
/// spans' boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Spans in this line, ordered left to right
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans, sorting them left to right.
    pub fn new(mut spans: Vec<Span>) -> Self {
        spans.sort_by(|a, b| {
            a.bbox
                .x0
                .partial_cmp(&b.bbox.x0)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { spans }
    }

    /// Joined text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Union of the spans' bounding boxes.
    pub fn bbox(&self) -> BBox {
        BBox::union_all(self.spans.iter().map(|s| s.bbox))
    }

    /// Dominant font size, weighted by character count.
    pub fn font_size(&self) -> f32 {
        let total_chars: usize = self.spans.iter().map(|s| s.text.chars().count()).sum();
        if total_chars == 0 {
            return self.spans.first().map(|s| s.font_size).unwrap_or(0.0);
        }
        let weighted: f32 = self
            .spans
            .iter()
            .map(|s| s.font_size * s.text.chars().count() as f32)
            .sum();
        weighted / total_chars as f32
    }

    /// Check if the line is predominantly bold (by character count).
    pub fn is_bold(&self) -> bool {
        let bold_chars: usize = self
            .spans
            .iter()
            .filter(|s| s.bold)
            .map(|s| s.text.chars().count())
            .sum();
        let total_chars: usize = self.spans.iter().map(|s| s.text.chars().count()).sum();
        total_chars > 0 && bold_chars as f32 / total_chars as f32 > 0.5
    }

    /// Check if the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    /// Most common font name in the line, by character count.
    pub fn modal_font(&self) -> Option<&str> {
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for span in &self.spans {
            *counts.entry(span.font_name.as_str()).or_insert(0) += span.text.chars().count();
        }
        counts
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_orders_spans() {
        let line = Line::new(vec![
            Span::new("world", 11.0).at(BBox::new(50.0, 0.0, 80.0, 11.0)),
            Span::new("Hello ", 11.0).at(BBox::new(10.0, 0.0, 49.0, 11.0)),
        ]);
        assert_eq!(line.text(), "Hello world");
    }

    #[test]
    fn test_weighted_font_size() {
        let line = Line::new(vec![
            Span::new("a", 24.0).at(BBox::new(0.0, 0.0, 10.0, 24.0)),
            Span::new("long body run", 12.0).at(BBox::new(10.0, 0.0, 90.0, 12.0)),
        ]);
        // 13 chars at 12pt dominate 1 char at 24pt
        assert!(line.font_size() < 13.0);
    }

    #[test]
    fn test_is_bold_majority() {
        let line = Line::new(vec![
            Span::new("Heading", 11.0).bold(),
            Span::new("!", 11.0),
        ]);
        assert!(line.is_bold());
    }

    #[test]
    fn test_modal_font() {
        let line = Line::new(vec![
            Span::new("body body body", 11.0).with_font("Times"),
            Span::new("x", 11.0).with_font("Courier"),
        ]);
        assert_eq!(line.modal_font(), Some("Times"));
    }
}
