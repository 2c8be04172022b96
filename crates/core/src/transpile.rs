//! Block router: folds a block list into one document body and summary.

use crate::FolioError;
use crate::block::{ContentBlock, ListKind, decode_blocks};
use crate::error::TranspileDiagnostics;
use crate::inline::{InlineFormatter, InlineTarget};
use crate::options::{OutputFormat, TranspileOptions};
use crate::render::{Emitter, ListEntry, emitter_for};
use crate::runs::{Segment, group_runs};
use crate::slug::Slugger;
use crate::summary::build_summary;
use crate::toc::{HeadingEntry, OutlineNode, build_outline};
use crate::url::{is_missing, resolve_url};
use serde::Serialize;
use serde_json::Value;

/// Alt text for images without a name.
pub const DEFAULT_IMAGE_ALT: &str = "Blog image";

/// Rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transpiled {
    /// Document body in the requested format.
    pub content: String,
    /// Plain-text teaser.
    pub summary: String,
    /// Every heading, in document order.
    pub headings: Vec<HeadingEntry>,
}

impl Transpiled {
    /// Nested table of contents down to `max_depth`.
    pub fn outline(&self, max_depth: u8) -> Vec<OutlineNode> {
        build_outline(&self.headings, max_depth)
    }
}

/// Transpiles with default options (HTML, code excluded from the summary).
pub fn transpile(blocks: &[ContentBlock]) -> Transpiled {
    transpile_with_options(blocks, &TranspileOptions::default())
}

/// Transpiles `blocks` with `options`.
pub fn transpile_with_options(blocks: &[ContentBlock], options: &TranspileOptions) -> Transpiled {
    transpile_with_diagnostics(blocks, options).0
}

/// Transpiles `blocks`, also returning everything that was dropped or
/// replaced along the way.
pub fn transpile_with_diagnostics(
    blocks: &[ContentBlock],
    options: &TranspileOptions,
) -> (Transpiled, TranspileDiagnostics) {
    let mut router = Router::new(options);
    let fragment = group_runs(blocks)
        .into_iter()
        .fold(Fragment::default(), |acc, segment| {
            acc.combine(router.render(segment))
        });

    let plain = fragment.plain.join(" ");
    let result = Transpiled {
        content: fragment.markup.join(router.emitter.separator()),
        summary: build_summary(&plain, options),
        headings: fragment.headings,
    };
    (result, router.diagnostics)
}

/// Decodes a JSON block array and transpiles it. Malformed records are
/// skipped.
pub fn transpile_value(content: &Value, options: &TranspileOptions) -> Transpiled {
    transpile_with_options(&decode_blocks(content), options)
}

/// Parses and transpiles a JSON block array.
pub fn transpile_json(json: &str, options: &TranspileOptions) -> Result<Transpiled, FolioError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(transpile_value(&value, options))
}

/// Output of one segment.
#[derive(Debug, Default)]
struct Fragment {
    markup: Vec<String>,
    plain: Vec<String>,
    headings: Vec<HeadingEntry>,
}

impl Fragment {
    fn combine(mut self, other: Fragment) -> Fragment {
        self.markup.extend(other.markup);
        self.plain.extend(other.plain);
        self.headings.extend(other.headings);
        self
    }

    fn push_markup(&mut self, piece: String) {
        if !piece.is_empty() {
            self.markup.push(piece);
        }
    }

    fn push_plain(&mut self, text: String) {
        if !text.trim().is_empty() {
            self.plain.push(text);
        }
    }
}

/// Per-call state: slugs must be unique across the whole document.
struct Router<'a> {
    options: &'a TranspileOptions,
    emitter: &'static dyn Emitter,
    inline: InlineFormatter<'a>,
    plain: InlineFormatter<'a>,
    slugger: Slugger,
    diagnostics: TranspileDiagnostics,
}

impl<'a> Router<'a> {
    fn new(options: &'a TranspileOptions) -> Self {
        let emitter = emitter_for(options.format);
        Self {
            options,
            emitter,
            inline: InlineFormatter::new(emitter.inline_target(), options),
            plain: InlineFormatter::new(InlineTarget::Plain, options),
            slugger: Slugger::new(),
            diagnostics: TranspileDiagnostics::new(),
        }
    }

    fn render(&mut self, segment: Segment<'_>) -> Fragment {
        match segment {
            Segment::Single { index, block } => self.render_block(index, block),
            Segment::List { start, kind, items } => self.render_list(start, kind, items),
        }
    }

    fn render_block(&mut self, index: usize, block: &ContentBlock) -> Fragment {
        let mut out = Fragment::default();
        match block {
            ContentBlock::Text(text) if !text.is_empty() => self.render_text(text, &mut out),
            ContentBlock::Quote(text) if !text.is_empty() => {
                out.push_markup(self.emitter.blockquote(&self.inline.format(text)));
                out.push_plain(self.plain.format(text));
            }
            ContentBlock::Code { code, language } if !code.is_empty() => {
                out.push_markup(self.emitter.code_block(code, language.as_deref()));
                if self.options.include_code_in_summary {
                    out.push_plain(code.clone());
                }
            }
            ContentBlock::Images(images) => {
                if images.is_empty() {
                    self.diagnostics.warn_at(index, "images block has no images");
                }
                for image in images {
                    if is_missing(image.url.as_deref()) {
                        self.diagnostics
                            .warn_at(index, "image without a URL; using placeholder");
                    }
                    let src = resolve_url(image.url.as_deref(), self.options);
                    let alt = image
                        .name
                        .as_deref()
                        .filter(|name| !name.trim().is_empty())
                        .unwrap_or(DEFAULT_IMAGE_ALT);
                    out.push_markup(self.emitter.image(&src, alt));
                }
            }
            ContentBlock::Unknown { kind, text } if !text.is_empty() => {
                self.diagnostics.note_at(
                    index,
                    format!("unknown block type `{}` rendered as a paragraph", kind),
                );
                out.push_markup(self.emitter.paragraph(&self.inline.format(text)));
                out.push_plain(self.plain.format(text));
            }
            ContentBlock::Unknown { kind, .. } => {
                self.diagnostics.note_at(
                    index,
                    format!("unknown block type `{}` without text; ignored", kind),
                );
            }
            ContentBlock::ListItem { kind, .. } => {
                // Segments never carry list items as singles; render as a
                // one-item run to stay total.
                return self.render_list(index, *kind, std::slice::from_ref(block));
            }
            other => {
                self.diagnostics
                    .warn_at(index, format!("empty `{}` block skipped", other.type_name()));
            }
        }
        out
    }

    fn render_text(&mut self, text: &str, out: &mut Fragment) {
        for line in text.split('\n').map(|l| l.trim_end_matches('\r')) {
            if line.trim().is_empty() {
                continue;
            }
            match heading_level(line) {
                Some((depth, rest)) => {
                    let rest = rest.trim();
                    let plain = self.plain.format(rest);
                    let slug = self.slugger.slug(&plain);
                    let id = (self.options.heading_ids && self.options.format == OutputFormat::Html)
                        .then_some(slug.as_str());
                    out.push_markup(self.emitter.heading(depth, id, &self.inline.format(rest)));
                    out.headings.push(HeadingEntry {
                        depth,
                        slug: slug.clone(),
                        text: plain.clone(),
                    });
                    out.push_plain(plain);
                }
                None => {
                    out.push_markup(self.emitter.paragraph(&self.inline.format(line)));
                    out.push_plain(self.plain.format(line));
                }
            }
        }
    }

    fn render_list(&mut self, start: usize, kind: ListKind, items: &[ContentBlock]) -> Fragment {
        let mut out = Fragment::default();
        let mut entries = Vec::with_capacity(items.len());

        for (offset, item) in items.iter().enumerate() {
            let ContentBlock::ListItem { text, checked, .. } = item else {
                continue;
            };
            if text.is_empty() {
                self.diagnostics
                    .warn_at(start + offset, format!("empty `{}` skipped", kind.type_name()));
                continue;
            }
            entries.push(ListEntry {
                body: self.inline.format(text),
                checked: *checked,
            });
            out.push_plain(self.plain.format(text));
        }

        out.push_markup(self.emitter.list(kind, &entries));
        out
    }
}

/// Heading depth and the text after the marker, for lines starting with one
/// to six `#` followed by a space.
fn heading_level(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    line[hashes..]
        .strip_prefix(' ')
        .map(|rest| (hashes as u8, rest))
}
