//! Page-level types: extraction input and transformed output.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::line::Line;

/// A raw image payload supplied by extraction.
///
/// The core never decodes or writes image bytes; it only assigns the asset a
/// relative path for the renderer to reference. The caller is responsible
/// for writing `data` to that path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    /// File name within the sidecar assets folder
    pub name: String,
    /// Raw encoded image bytes
    pub data: Vec<u8>,
}

impl ImageAsset {
    /// Conventional asset name for the `idx`-th image on a zero-based page.
    ///
    /// Produces names like `img_001_01.png`.
    pub fn numbered_name(page_index: usize, idx: usize) -> String {
        format!("img_{:03}_{:02}.png", page_index + 1, idx + 1)
    }
}

/// A page as delivered by extraction: ordered lines plus image payloads.
///
/// Page indices are contiguous and zero-based; lines are in reading order
/// (top to bottom, then left to right on ties).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// Zero-based page index
    pub index: usize,
    /// Lines in reading order
    pub lines: Vec<Line>,
    /// Raw images found on the page
    pub images: Vec<ImageAsset>,
}

impl PageText {
    /// Create a page from lines, with no images.
    pub fn new(index: usize, lines: Vec<Line>) -> Self {
        Self {
            index,
            lines,
            images: Vec::new(),
        }
    }

    /// Check if the page has no visible text.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.is_blank())
    }
}

/// A transformed page: the same content as classified blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Zero-based page index
    pub index: usize,
    /// Classified blocks in reading order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty transformed page.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            blocks: Vec::new(),
        }
    }

    /// Number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the page carries no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;

    #[test]
    fn test_numbered_name() {
        assert_eq!(ImageAsset::numbered_name(0, 0), "img_001_01.png");
        assert_eq!(ImageAsset::numbered_name(11, 2), "img_012_03.png");
    }

    #[test]
    fn test_blank_page() {
        let page = PageText::new(0, vec![Line::new(vec![Span::new("   ", 11.0)])]);
        assert!(page.is_blank());

        let page = PageText::new(0, vec![Line::new(vec![Span::new("text", 11.0)])]);
        assert!(!page.is_blank());
    }
}
