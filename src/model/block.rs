//! Classified semantic units of document structure.

use serde::{Deserialize, Serialize};

use super::geometry::BBox;
use super::line::Line;

/// Inline content within a paragraph.
///
/// The renderer escapes `Text` but emits `Math` verbatim inside dollar
/// delimiters, so math tokens like `\alpha` or `x^{2}` survive escaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Inline {
    /// Literal text, escaped on output
    Text(String),
    /// A converted math run
    Math {
        /// TeX-style token stream
        tex: String,
        /// Whether this is a standalone display expression
        display: bool,
    },
}

impl Inline {
    /// Plain text view of the inline (math renders as its token stream).
    pub fn plain_text(&self) -> &str {
        match self {
            Inline::Text(t) => t,
            Inline::Math { tex, .. } => tex,
        }
    }
}

/// A paragraph of flowing text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in reading order
    pub inlines: Vec<Inline>,
    /// Source lines, kept for traceability
    pub lines: Vec<Line>,
    /// Bounding geometry of the source lines
    pub bbox: BBox,
}

impl Paragraph {
    /// Create a paragraph from a single source line.
    pub fn from_line(line: Line) -> Self {
        let text = line.text().trim().to_string();
        let bbox = line.bbox();
        Self {
            inlines: vec![Inline::Text(text)],
            lines: vec![line],
            bbox,
        }
    }

    /// Create a paragraph with plain text and no source geometry.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            inlines: vec![Inline::Text(text.into())],
            lines: Vec::new(),
            bbox: BBox::zero(),
        }
    }

    /// Concatenated plain text of all inlines.
    pub fn plain_text(&self) -> String {
        self.inlines.iter().map(|i| i.plain_text()).collect()
    }

    /// Check if the paragraph has no visible content.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Check if the whole paragraph is a single display math expression.
    pub fn is_display_math(&self) -> bool {
        matches!(self.inlines.as_slice(), [Inline::Math { display: true, .. }])
    }
}

/// A reconstructed table grid.
///
/// Invariant: every row has the same number of columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBlock {
    /// Cell text, `rows[r][c]`
    pub rows: Vec<Vec<String>>,
    /// Whether row 0 is a header row
    pub header_row: bool,
    /// Source lines, kept for traceability
    pub lines: Vec<Line>,
    /// Bounding geometry of the source lines
    pub bbox: BBox,
}

impl TableBlock {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty table).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check whether the grid is rectangular.
    pub fn is_rectangular(&self) -> bool {
        let cols = self.column_count();
        self.rows.iter().all(|r| r.len() == cols)
    }
}

/// A classified content block on a page.
///
/// Closed sum type: every consumer (renderer, tests) matches exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Flowing paragraph text
    Paragraph(Paragraph),

    /// A heading with level 1..=6
    Heading {
        /// Heading level, 1 = strongest
        level: u8,
        /// Heading text
        text: String,
        /// Source lines
        lines: Vec<Line>,
        /// Bounding geometry
        bbox: BBox,
    },

    /// A bullet or numbered list item
    ListItem {
        /// Numbered/lettered marker vs bullet glyph
        ordered: bool,
        /// Nesting level, 0 = outermost
        indent_level: u8,
        /// Item number for ordered items
        number: Option<u32>,
        /// Item text with the marker stripped
        text: String,
        /// Source lines
        lines: Vec<Line>,
        /// Bounding geometry
        bbox: BBox,
    },

    /// A reconstructed table
    Table(TableBlock),

    /// Reference to an exported image asset
    ImageRef {
        /// Relative path from the output file, forward slashes
        path: String,
    },

    /// Boundary between two source pages
    PageBreak,
}

impl Block {
    /// Create a heading block from a source line.
    pub fn heading(level: u8, line: Line) -> Self {
        let text = line.text().trim().to_string();
        let bbox = line.bbox();
        Block::Heading {
            level: level.clamp(1, 6),
            text,
            lines: vec![line],
            bbox,
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;

    #[test]
    fn test_paragraph_from_line() {
        let line = Line::new(vec![Span::new("  Hello world  ", 11.0)]);
        let p = Paragraph::from_line(line);
        assert_eq!(p.plain_text(), "Hello world");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_heading_level_clamped() {
        let line = Line::new(vec![Span::new("Title", 24.0)]);
        if let Block::Heading { level, .. } = Block::heading(9, line) {
            assert_eq!(level, 6);
        } else {
            panic!("expected heading");
        }
    }

    #[test]
    fn test_table_rectangular() {
        let table = TableBlock {
            rows: vec![
                vec!["a".into(), "b".into()],
                vec!["c".into(), "d".into()],
            ],
            header_row: true,
            lines: Vec::new(),
            bbox: BBox::zero(),
        };
        assert!(table.is_rectangular());
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_display_math_paragraph() {
        let p = Paragraph {
            inlines: vec![Inline::Math {
                tex: "\\int x".into(),
                display: true,
            }],
            lines: Vec::new(),
            bbox: BBox::zero(),
        };
        assert!(p.is_display_math());
    }
}
