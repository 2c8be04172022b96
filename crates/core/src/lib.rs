#![deny(missing_docs)]
//! Folio core: turns headless-CMS content blocks into an HTML or Markdown
//! document body, a plain-text summary, and heading metadata.
//!
//! ```
//! use folio_core::{ContentBlock, transpile};
//!
//! let out = transpile(&[ContentBlock::text("# Title\nHello **world**")]);
//! assert_eq!(out.content, r#"<h1 id="title">Title</h1><p>Hello <strong>world</strong></p>"#);
//! assert_eq!(out.summary, "Title Hello world");
//! ```

/// Content block model and lenient JSON decoding.
pub mod block;
/// Core error and diagnostic types.
pub mod error;
/// Inline marker formatting.
pub mod inline;
/// Transpiler configuration.
pub mod options;
/// Output-format specific block writers.
pub mod render;
/// List run grouping.
pub mod runs;
/// Heading slug generation.
pub mod slug;
/// Summary derivation.
pub mod summary;
/// Heading metadata and outline building.
pub mod toc;
/// The block router and transpile entry points.
pub mod transpile;
/// URL normalization.
pub mod url;

pub use block::{
    ContentBlock, ImageRef, ListKind, decode_blocks, decode_blocks_with_diagnostics, parse_blocks,
};
pub use error::{Diagnostic, FolioError, Severity, TranspileDiagnostics};
pub use inline::{InlineFormatter, InlineTarget, format_inline, strip_inline};
pub use options::{OutputFormat, PLACEHOLDER_IMAGE_URL, SUMMARY_FALLBACK, TranspileOptions};
pub use slug::{Slugger, slugify};
pub use summary::{build_summary, summarize};
pub use toc::{HeadingEntry, OutlineNode, build_outline, path_to};
pub use transpile::{
    Transpiled, transpile, transpile_json, transpile_value, transpile_with_diagnostics,
    transpile_with_options,
};
pub use url::{normalize_url, normalize_url_value, resolve_url};
