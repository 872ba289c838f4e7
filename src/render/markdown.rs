//! Markdown emission for transformed blocks.

use crate::model::{Block, Inline, Paragraph, StructuredDocument, TableBlock};
use crate::options::Options;

/// Characters escaped in literal text.
const ESCAPED: [char; 5] = ['*', '_', '`', '|', '#'];

/// Escape Markdown-significant characters in literal text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render a structured document to a Markdown string.
///
/// Pure over its inputs: the same document and options always produce the
/// same string. Output ends with exactly one trailing newline.
pub fn render(doc: &StructuredDocument, options: &Options) -> String {
    let mut out = String::new();
    let mut prev_was_list = false;

    for page in &doc.pages {
        for block in &page.blocks {
            let Some(chunk) = render_block(block, options) else {
                continue;
            };
            // Adjacent list items stay tight; everything else gets a blank
            // line between blocks.
            if !out.is_empty() {
                if prev_was_list && block.is_list_item() {
                    out.push('\n');
                } else {
                    out.push_str("\n\n");
                }
            }
            out.push_str(&chunk);
            prev_was_list = block.is_list_item();
        }
    }

    let mut out = out.trim().to_string();
    out.push('\n');
    out
}

fn render_block(block: &Block, options: &Options) -> Option<String> {
    match block {
        Block::Heading { level, text, .. } => {
            Some(format!("{} {}", "#".repeat(*level as usize), escape(text)))
        }
        Block::Paragraph(p) => render_paragraph(p),
        Block::ListItem {
            ordered,
            indent_level,
            number,
            text,
            ..
        } => {
            let indent = "  ".repeat(*indent_level as usize);
            let marker = if *ordered {
                format!("{}.", number.unwrap_or(1))
            } else {
                "-".to_string()
            };
            Some(format!("{indent}{marker} {}", escape(text)))
        }
        Block::Table(table) => Some(render_table(table)),
        Block::ImageRef { path } => options
            .export_images
            .then(|| format!("![]({path})")),
        Block::PageBreak => options.insert_page_breaks.then(|| "---".to_string()),
    }
}

fn render_paragraph(p: &Paragraph) -> Option<String> {
    if p.is_empty() {
        return None;
    }
    if p.is_display_math() {
        if let Some(Inline::Math { tex, .. }) = p.inlines.first() {
            return Some(format!("$${tex}$$"));
        }
    }
    let mut out = String::new();
    for inline in &p.inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape(text)),
            Inline::Math { tex, .. } => {
                out.push('$');
                out.push_str(tex);
                out.push('$');
            }
        }
    }
    Some(out)
}

/// Emit a pipe table. Markdown requires a header row; when the grid has
/// none, an empty header is emitted so no data row gets promoted.
fn render_table(table: &TableBlock) -> String {
    let cols = table.column_count();
    if cols == 0 || table.rows.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = Vec::with_capacity(table.row_count() + 2);
    let separator = format!("|{}", " --- |".repeat(cols));

    let mut data_rows = table.rows.iter();
    if table.header_row {
        if let Some(header) = data_rows.next() {
            lines.push(render_row(header));
        }
    } else {
        lines.push(format!("|{}", "  |".repeat(cols)));
    }
    lines.push(separator);
    for row in data_rows {
        lines.push(render_row(row));
    }

    lines.join("\n")
}

fn render_row(row: &[String]) -> String {
    let cells: Vec<String> = row.iter().map(|cell| render_cell(cell)).collect();
    format!("| {} |", cells.join(" | "))
}

/// Cell text with pipes escaped and line breaks collapsed.
fn render_cell(cell: &str) -> String {
    let flat = cell.split_whitespace().collect::<Vec<_>>().join(" ");
    escape(&flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Page};
    use crate::transform::FontStats;

    fn doc(blocks: Vec<Block>) -> StructuredDocument {
        StructuredDocument {
            pages: vec![Page { index: 0, blocks }],
            stats: FontStats::default(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a*b_c`d|e#f"), "a\\*b\\_c\\`d\\|e\\#f");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_heading_levels() {
        let d = doc(vec![
            Block::Heading {
                level: 1,
                text: "Title".into(),
                lines: Vec::new(),
                bbox: BBox::zero(),
            },
            Block::Heading {
                level: 3,
                text: "Sub".into(),
                lines: Vec::new(),
                bbox: BBox::zero(),
            },
        ]);
        assert_eq!(render(&d, &Options::default()), "# Title\n\n### Sub\n");
    }

    #[test]
    fn test_math_not_escaped() {
        let d = doc(vec![Block::Paragraph(Paragraph {
            inlines: vec![
                Inline::Text("water is ".into()),
                Inline::Math {
                    tex: "H_{2}O".into(),
                    display: false,
                },
            ],
            lines: Vec::new(),
            bbox: BBox::zero(),
        })]);
        assert_eq!(render(&d, &Options::default()), "water is $H_{2}O$\n");
    }

    #[test]
    fn test_list_rendering() {
        let item = |ordered, indent_level, number, text: &str| Block::ListItem {
            ordered,
            indent_level,
            number,
            text: text.into(),
            lines: Vec::new(),
            bbox: BBox::zero(),
        };
        let d = doc(vec![
            item(false, 0, None, "First"),
            item(false, 1, None, "Nested"),
            item(true, 0, Some(3), "Third"),
        ]);
        assert_eq!(
            render(&d, &Options::default()),
            "- First\n  - Nested\n3. Third\n"
        );
    }

    #[test]
    fn test_list_separated_from_surrounding_blocks() {
        let d = doc(vec![
            Block::Paragraph(Paragraph::with_text("before")),
            Block::ListItem {
                ordered: false,
                indent_level: 0,
                number: None,
                text: "item".into(),
                lines: Vec::new(),
                bbox: BBox::zero(),
            },
            Block::Paragraph(Paragraph::with_text("after")),
        ]);
        assert_eq!(
            render(&d, &Options::default()),
            "before\n\n- item\n\nafter\n"
        );
    }

    #[test]
    fn test_display_math_double_delimited() {
        let d = doc(vec![Block::Paragraph(Paragraph {
            inlines: vec![Inline::Math {
                tex: "\\sum \\alpha".into(),
                display: true,
            }],
            lines: Vec::new(),
            bbox: BBox::zero(),
        })]);
        assert_eq!(render(&d, &Options::default()), "$$\\sum \\alpha$$\n");
    }

    #[test]
    fn test_table_with_header() {
        let d = doc(vec![Block::Table(TableBlock {
            rows: vec![
                vec!["Name".into(), "Value".into()],
                vec!["alpha".into(), "1".into()],
            ],
            header_row: true,
            lines: Vec::new(),
            bbox: BBox::zero(),
        })]);
        assert_eq!(
            render(&d, &Options::default()),
            "| Name | Value |\n| --- | --- |\n| alpha | 1 |\n"
        );
    }

    #[test]
    fn test_table_without_header() {
        let d = doc(vec![Block::Table(TableBlock {
            rows: vec![vec!["a".into(), "b".into()]],
            header_row: false,
            lines: Vec::new(),
            bbox: BBox::zero(),
        })]);
        let md = render(&d, &Options::default());
        let first = md.lines().next().unwrap();
        assert!(first.chars().all(|c| c == '|' || c == ' '), "{first:?}");
        assert!(md.contains("| a | b |"));
    }

    #[test]
    fn test_cell_pipes_escaped() {
        let d = doc(vec![Block::Table(TableBlock {
            rows: vec![vec!["a|b".into(), "multi\nline".into()]],
            header_row: true,
            lines: Vec::new(),
            bbox: BBox::zero(),
        })]);
        let md = render(&d, &Options::default());
        assert!(md.contains("a\\|b"));
        assert!(md.contains("multi line"));
    }

    #[test]
    fn test_page_break_gated() {
        let d = doc(vec![
            Block::Paragraph(Paragraph::with_text("a")),
            Block::PageBreak,
            Block::Paragraph(Paragraph::with_text("b")),
        ]);
        assert_eq!(
            render(&d, &Options::default().with_page_breaks(true)),
            "a\n\n---\n\nb\n"
        );
        assert_eq!(render(&d, &Options::default()), "a\n\nb\n");
    }

    #[test]
    fn test_image_ref_gated() {
        let d = doc(vec![Block::ImageRef {
            path: "doc_assets/img_001_01.png".into(),
        }]);
        assert_eq!(
            render(&d, &Options::default().with_image_export(true)),
            "![](doc_assets/img_001_01.png)\n"
        );
        assert_eq!(render(&d, &Options::default()), "\n");
    }

    #[test]
    fn test_trailing_newline() {
        let d = doc(Vec::new());
        assert_eq!(render(&d, &Options::default()), "\n");
    }
}
