//! Document model: spans, lines, classified blocks, pages, and documents.

mod block;
mod document;
mod geometry;
mod line;
mod page;

pub use block::{Block, Inline, Paragraph, TableBlock};
pub use document::StructuredDocument;
pub use geometry::BBox;
pub use line::{Line, Span};
pub use page::{ImageAsset, Page, PageText};
