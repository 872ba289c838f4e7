//! Conversion options and eager validation.

use crate::error::{Error, Result};

/// OCR preference for the upstream extractor.
///
/// Recognized here so configuration errors surface before any processing,
/// but otherwise consumed upstream of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrMode {
    /// Let the extractor decide per page
    #[default]
    Auto,
    /// Never run OCR
    Never,
    /// Force OCR on every page
    Always,
}

impl OcrMode {
    /// Parse an enumerated option value.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(OcrMode::Auto),
            "never" | "off" => Ok(OcrMode::Never),
            "always" | "force" => Ok(OcrMode::Always),
            other => Err(Error::Config(format!("unknown ocr_mode value: {other:?}"))),
        }
    }
}

/// Options controlling transformation and rendering.
#[derive(Debug, Clone)]
pub struct Options {
    /// OCR preference, consumed by the upstream extractor
    pub ocr_mode: OcrMode,

    /// Process only the first few pages (preview)
    pub preview_only: bool,

    /// Promote mostly-uppercase lines to headings
    pub caps_to_headings: bool,

    /// Merge short orphan lines into their paragraph
    pub defragment_short: bool,

    /// Font-size multiplier over body size that triggers heading promotion
    pub heading_size_ratio: f32,

    /// Maximum length of a line eligible for orphan merging
    pub orphan_max_len: usize,

    /// Drop lines repeating at the same page edge across most pages
    pub remove_headers_footers: bool,

    /// Emit a horizontal rule between pages
    pub insert_page_breaks: bool,

    /// Emit image references into the output
    pub export_images: bool,

    /// Output stem naming the `<stem>_assets/` sidecar folder
    pub output_stem: String,
}

impl Options {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OCR mode.
    pub fn with_ocr_mode(mut self, mode: OcrMode) -> Self {
        self.ocr_mode = mode;
        self
    }

    /// Limit processing to a short preview.
    pub fn preview(mut self) -> Self {
        self.preview_only = true;
        self
    }

    /// Enable or disable caps-based heading promotion.
    pub fn with_caps_to_headings(mut self, enabled: bool) -> Self {
        self.caps_to_headings = enabled;
        self
    }

    /// Enable or disable orphan defragmentation.
    pub fn with_defragment(mut self, enabled: bool) -> Self {
        self.defragment_short = enabled;
        self
    }

    /// Set the heading promotion ratio.
    pub fn with_heading_ratio(mut self, ratio: f32) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Set the maximum orphan line length.
    pub fn with_orphan_max_len(mut self, len: usize) -> Self {
        self.orphan_max_len = len;
        self
    }

    /// Enable or disable repeating header/footer removal.
    pub fn with_header_footer_removal(mut self, enabled: bool) -> Self {
        self.remove_headers_footers = enabled;
        self
    }

    /// Enable or disable page break rules in the output.
    pub fn with_page_breaks(mut self, enabled: bool) -> Self {
        self.insert_page_breaks = enabled;
        self
    }

    /// Enable or disable image references in the output.
    pub fn with_image_export(mut self, enabled: bool) -> Self {
        self.export_images = enabled;
        self
    }

    /// Set the output stem used to name the assets folder.
    pub fn with_output_stem(mut self, stem: impl Into<String>) -> Self {
        self.output_stem = stem.into();
        self
    }

    /// Relative sidecar folder for exported images.
    pub fn assets_dir(&self) -> String {
        format!("{}_assets", self.output_stem)
    }

    /// Validate the configuration, rejecting it before any processing.
    pub fn validate(&self) -> Result<()> {
        if !self.heading_size_ratio.is_finite() || self.heading_size_ratio <= 0.0 {
            return Err(Error::Config(format!(
                "heading_size_ratio must be a positive finite number, got {}",
                self.heading_size_ratio
            )));
        }
        if self.orphan_max_len == 0 {
            return Err(Error::Config(
                "orphan_max_len must be at least 1".to_string(),
            ));
        }
        if self.output_stem.trim().is_empty() {
            return Err(Error::Config("output_stem must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ocr_mode: OcrMode::Auto,
            preview_only: false,
            caps_to_headings: false,
            defragment_short: false,
            heading_size_ratio: 1.15,
            orphan_max_len: 45,
            remove_headers_footers: true,
            insert_page_breaks: false,
            export_images: false,
            output_stem: "output".to_string(),
        }
    }
}
