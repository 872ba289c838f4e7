//! Document-level container for transformed pages.

use serde::{Deserialize, Serialize};

use super::page::Page;
use crate::transform::FontStats;

/// The fully transformed document: ordered pages plus the document-wide
/// typography statistics computed by the indexer.
///
/// The statistics are threaded through the pipeline as an explicit read-only
/// context and stored here for callers that want to inspect them; they are
/// never ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Transformed pages in ascending index order
    pub pages: Vec<Page>,
    /// Document-wide body size and heading buckets
    pub stats: FontStats,
}

impl StructuredDocument {
    /// Total number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.block_count()).sum()
    }

    /// Check if the document has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.is_empty())
    }
}
