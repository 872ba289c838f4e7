//! Markdown rendering of structured documents.

mod markdown;

pub use markdown::{escape, render};
