//! Document-wide typography statistics (the geometry/typography indexer).
//!
//! One pass over every line of every page builds a character-weighted font
//! size histogram. The modal bucket is the body size; distinct larger
//! buckets become the heading level ranking used by the classifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::PageText;

/// Fallback body size for documents with no visible text.
const DEFAULT_BODY_SIZE: f32 = 11.0;

/// Histogram bucket width in points.
const BUCKET_PT: f32 = 0.5;

/// Document-wide font statistics.
///
/// Computed once by [`FontStats::compute`] and treated as read-only for the
/// remainder of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontStats {
    /// Modal font size across the document (heading baseline)
    pub body_size: f32,
    /// Distinct heading-sized buckets, largest first, mapped to levels 1..
    pub heading_sizes: Vec<f32>,
}

impl FontStats {
    /// Scan all pages and compute body size and heading buckets.
    ///
    /// The histogram is weighted by character count so a single oversized
    /// title cannot outvote the body text. Buckets at or above
    /// `body_size * heading_size_ratio` are ranked descending; ranks past
    /// the sixth collapse to level 6.
    pub fn compute(pages: &[PageText], heading_size_ratio: f32) -> Self {
        let mut histogram: HashMap<i32, usize> = HashMap::new();

        for page in pages {
            for line in &page.lines {
                for span in &line.spans {
                    let chars = span.text.trim().chars().count();
                    if chars == 0 {
                        continue;
                    }
                    *histogram.entry(bucket_key(span.font_size)).or_insert(0) += chars;
                }
            }
        }

        if histogram.is_empty() {
            return Self {
                body_size: DEFAULT_BODY_SIZE,
                heading_sizes: Vec::new(),
            };
        }

        // Modal bucket; ties break toward the smaller size for determinism.
        let body_key = histogram
            .iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then(kb.cmp(ka)))
            .map(|(k, _)| *k)
            .unwrap_or(0);
        let body_size = bucket_size(body_key);

        let threshold = body_size * heading_size_ratio;
        let mut heading_sizes: Vec<f32> = histogram
            .keys()
            .map(|k| bucket_size(*k))
            .filter(|size| *size >= threshold && *size > body_size)
            .collect();
        heading_sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        heading_sizes.dedup();

        Self {
            body_size,
            heading_sizes,
        }
    }

    /// Heading level (1..=6) for a font size, or `None` for body-sized text.
    ///
    /// Level 1 is the largest bucket; buckets past the sixth collapse to 6.
    pub fn level_for_size(&self, font_size: f32) -> Option<u8> {
        for (rank, &bucket) in self.heading_sizes.iter().enumerate() {
            if font_size >= bucket - BUCKET_PT / 2.0 {
                return Some((rank + 1).min(6) as u8);
            }
        }
        None
    }

    /// Number of distinct heading buckets.
    pub fn heading_bucket_count(&self) -> usize {
        self.heading_sizes.len()
    }
}

impl Default for FontStats {
    fn default() -> Self {
        Self {
            body_size: DEFAULT_BODY_SIZE,
            heading_sizes: Vec::new(),
        }
    }
}

fn bucket_key(size: f32) -> i32 {
    (size / BUCKET_PT).round() as i32
}

fn bucket_size(key: i32) -> f32 {
    key as f32 * BUCKET_PT
}
