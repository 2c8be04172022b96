//! Transpiler configuration.

use crate::FolioError;
use serde::{Deserialize, Serialize};

/// Image URL used whenever a block carries no usable image reference.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/800x600.png";
/// Summary returned when the document has no prose at all.
pub const SUMMARY_FALLBACK: &str = "No summary available.";
/// Default summary length in characters (before the ellipsis).
pub const SUMMARY_MAX_CHARS: usize = 120;
/// Default deepest heading level included in the outline.
pub const TOC_MAX_DEPTH: u8 = 3;

/// Markup flavour of the rendered document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragment, ready for direct injection.
    #[default]
    Html,
    /// Markdown, for pages that hand the body to a Markdown renderer.
    Markdown,
}

/// Options controlling a single transpile call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileOptions {
    /// Output markup flavour.
    pub format: OutputFormat,
    /// Whether `code` blocks contribute to the summary.
    #[serde(alias = "includeCodeInSummary")]
    pub include_code_in_summary: bool,
    /// Summary length limit in characters.
    #[serde(alias = "summaryMaxChars")]
    pub summary_max_chars: usize,
    /// Summary returned when no prose was found.
    #[serde(alias = "summaryFallback")]
    pub summary_fallback: String,
    /// Image URL substituted for missing references.
    #[serde(alias = "placeholderImage")]
    pub placeholder_image: String,
    /// Prefix for relative asset paths. Relative paths become root-relative
    /// (`/path`) when unset.
    #[serde(alias = "assetBase")]
    pub asset_base: Option<String>,
    /// Whether HTML headings get an `id` attribute matching their slug.
    #[serde(alias = "headingIds")]
    pub heading_ids: bool,
    /// Deepest heading level included in the outline (1-6).
    #[serde(alias = "tocMaxDepth")]
    pub toc_max_depth: u8,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            include_code_in_summary: false,
            summary_max_chars: SUMMARY_MAX_CHARS,
            summary_fallback: SUMMARY_FALLBACK.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE_URL.to_string(),
            asset_base: None,
            heading_ids: true,
            toc_max_depth: TOC_MAX_DEPTH,
        }
    }
}

impl TranspileOptions {
    /// Defaults with Markdown output.
    pub fn markdown() -> Self {
        Self {
            format: OutputFormat::Markdown,
            ..Self::default()
        }
    }

    /// Parse options from a JSON object. Missing fields keep their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, FolioError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self = serde_json::from_str(input)?;
        options.validated()
    }

    /// Parse options from a YAML mapping. Missing fields keep their defaults.
    pub fn from_yaml_str(input: &str) -> Result<Self, FolioError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Option<Self> = serde_yaml::from_str(input)?;
        options.unwrap_or_default().validated()
    }

    /// Check ranged fields.
    pub fn validated(self) -> Result<Self, FolioError> {
        if !(1..=6).contains(&self.toc_max_depth) {
            return Err(FolioError::invalid_option(
                "toc_max_depth",
                format!("must be between 1 and 6, got {}", self.toc_max_depth),
            ));
        }
        if self.summary_max_chars == 0 {
            return Err(FolioError::invalid_option(
                "summary_max_chars",
                "must be greater than zero",
            ));
        }
        Ok(self)
    }
}
