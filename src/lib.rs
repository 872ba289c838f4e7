//! # pagemd
//!
//! Structural Markdown reconstruction from extracted page text and layout.
//!
//! This library takes per-page text primitives (spans and lines with font
//! sizes and bounding boxes, as produced by a PDF or layout extractor) and
//! rebuilds the document's semantic structure: headings, paragraphs, lists,
//! tables, and page boundaries. The structured document renders to Markdown.
//!
//! ## Quick Start
//!
//! ```
//! use pagemd::{to_markdown, Line, Options, PageText, Span};
//!
//! fn main() -> pagemd::Result<()> {
//!     let page = PageText::new(
//!         0,
//!         vec![
//!             Line::new(vec![Span::new("Introduction", 24.0)]),
//!             Line::new(vec![Span::new("Body text at the usual size.", 11.0)]),
//!         ],
//!     );
//!
//!     let markdown = to_markdown(vec![page], &Options::default())?;
//!     assert!(markdown.starts_with("# Introduction"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typography indexing**: document-wide body size and heading levels
//!   from a character-weighted font size histogram
//! - **Boilerplate removal**: repeating headers and footers detected across
//!   pages and dropped
//! - **Structure detection**: lists, tables with header inference, and
//!   orphan line defragmentation
//! - **Math conversion**: Unicode math symbols rewritten as TeX-style runs
//! - **Deterministic**: same input and options, same output; no ambient
//!   state and no per-page parallelism

pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    BBox, Block, ImageAsset, Inline, Line, Page, PageText, Paragraph, Span, StructuredDocument,
    TableBlock,
};
pub use options::{OcrMode, Options};
pub use transform::{transform, transform_with_hooks, FontStats, Hooks};

/// Transform extracted pages and render the result to Markdown.
///
/// Convenience wrapper over [`transform`] followed by [`render::render`].
pub fn to_markdown(pages: Vec<PageText>, options: &Options) -> Result<String> {
    let doc = transform(pages, options)?;
    Ok(render::render(&doc, options))
}
