//! Block-level markup writers.
//!
//! The router decides *what* to emit; an [`Emitter`] decides how each block
//! looks in the output format.

mod html;
mod markdown;

pub use html::HtmlEmitter;
pub use markdown::MarkdownEmitter;

use crate::block::ListKind;
use crate::inline::InlineTarget;
use crate::options::OutputFormat;

/// One rendered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Inline-formatted item text.
    pub body: String,
    /// Todo completion state.
    pub checked: bool,
}

/// Writes block-level markup for one output format.
///
/// `body` arguments are already inline-formatted for [`Emitter::inline_target`];
/// `code` and attribute-like arguments are raw and escaped by the emitter.
pub trait Emitter {
    /// Target used for inline formatting of block bodies.
    fn inline_target(&self) -> InlineTarget;
    /// A heading of `depth` (1-6) with an optional anchor id.
    fn heading(&self, depth: u8, id: Option<&str>, body: &str) -> String;
    /// A paragraph.
    fn paragraph(&self, body: &str) -> String;
    /// A blockquote.
    fn blockquote(&self, body: &str) -> String;
    /// A preformatted code block.
    fn code_block(&self, code: &str, language: Option<&str>) -> String;
    /// A complete list container with its items.
    fn list(&self, kind: ListKind, items: &[ListEntry]) -> String;
    /// A standalone image.
    fn image(&self, src: &str, alt: &str) -> String;
    /// Text placed between consecutive block outputs.
    fn separator(&self) -> &'static str;
}

/// The emitter for `format`.
pub fn emitter_for(format: OutputFormat) -> &'static dyn Emitter {
    match format {
        OutputFormat::Html => &HtmlEmitter,
        OutputFormat::Markdown => &MarkdownEmitter,
    }
}
