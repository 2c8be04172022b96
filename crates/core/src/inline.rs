//! Inline formatting inside a single text value.
//!
//! Rules run once each, in a fixed order: link, image, bold, italic,
//! strikethrough, inline code. Markup produced by a rule is parked behind a
//! sentinel token so later rules never see its delimiters; only the
//! human-visible text between delimiters stays live for the following rules.
//! Tokens are expanded back at the end.

use crate::options::TranspileOptions;
use crate::url::resolve_url;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("image pattern"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").expect("bold pattern"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").expect("italic pattern"));
static STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.*?)~~").expect("strike pattern"));
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.*?)`").expect("code pattern"));
static SENTINEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{E000}\x{E001}]").expect("sentinel pattern"));
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").expect("token pattern"));

/// What inline markers are rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineTarget {
    /// HTML elements.
    Html,
    /// Normalized Markdown markers (`_em_` becomes `*em*`, and so on).
    Markdown,
    /// Markers removed, keeping only readable text.
    Plain,
}

/// Applies the inline rules for one target.
#[derive(Debug, Clone, Copy)]
pub struct InlineFormatter<'a> {
    target: InlineTarget,
    options: &'a TranspileOptions,
}

impl<'a> InlineFormatter<'a> {
    /// Create a formatter; `options` supplies image URL resolution.
    pub fn new(target: InlineTarget, options: &'a TranspileOptions) -> Self {
        Self { target, options }
    }

    /// The target this formatter writes.
    pub fn target(&self) -> InlineTarget {
        self.target
    }

    /// Rewrite inline markers in `text`. Text without markers is returned
    /// unchanged.
    pub fn format(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        if !text.contains(['[', '*', '_', '~', '`', OPEN, CLOSE]) {
            return text.to_string();
        }

        let mut stash = Stash::default();
        let text = SENTINEL
            .replace_all(text, |caps: &Captures| stash.hold(caps[0].to_string()))
            .into_owned();

        let text = self.links(&text, &mut stash);
        let text = self.images(&text, &mut stash);
        let text = self.wrap(&BOLD, &text, &mut stash, self.pair("<strong>", "</strong>", "**"));
        let text = self.wrap(&ITALIC, &text, &mut stash, self.pair("<em>", "</em>", "*"));
        let text = self.wrap(&STRIKE, &text, &mut stash, self.pair("<del>", "</del>", "~~"));
        let text = self.code_spans(&text, &mut stash);

        stash.expand(&text, stash.len())
    }

    fn pair(
        &self,
        html_open: &'static str,
        html_close: &'static str,
        md: &'static str,
    ) -> (&'static str, &'static str) {
        match self.target {
            InlineTarget::Html => (html_open, html_close),
            InlineTarget::Markdown => (md, md),
            InlineTarget::Plain => ("", ""),
        }
    }

    fn links(&self, text: &str, stash: &mut Stash) -> String {
        LINK.replace_all(text, |caps: &Captures| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            // `![alt](src)` belongs to the image rule.
            if text[..whole.start].ends_with('!') {
                return caps[0].to_string();
            }
            let label = &caps[1];
            let href = caps[2].trim();
            match self.target {
                InlineTarget::Html => format!(
                    "{}{}{}",
                    stash.hold(format!(
                        r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
                        html_escape::encode_double_quoted_attribute(href)
                    )),
                    label,
                    stash.hold("</a>".to_string())
                ),
                InlineTarget::Markdown => format!(
                    "{}{}{}",
                    stash.hold("[".to_string()),
                    label,
                    stash.hold(format!("]({})", href))
                ),
                InlineTarget::Plain => label.to_string(),
            }
        })
        .into_owned()
    }

    fn images(&self, text: &str, stash: &mut Stash) -> String {
        IMAGE
            .replace_all(text, |caps: &Captures| {
                let alt = &caps[1];
                let src = resolve_url(Some(&caps[2]), self.options);
                match self.target {
                    InlineTarget::Html => stash.hold(format!(
                        r#"<img src="{}" alt="{}" />"#,
                        html_escape::encode_double_quoted_attribute(&src),
                        html_escape::encode_double_quoted_attribute(alt)
                    )),
                    InlineTarget::Markdown => stash.hold(format!("![{}]({})", alt, src)),
                    InlineTarget::Plain => stash.hold(alt.to_string()),
                }
            })
            .into_owned()
    }

    fn wrap(
        &self,
        pattern: &Regex,
        text: &str,
        stash: &mut Stash,
        (open, close): (&str, &str),
    ) -> String {
        pattern
            .replace_all(text, |caps: &Captures| {
                let inner = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map_or("", |m| m.as_str());
                if open.is_empty() {
                    return inner.to_string();
                }
                format!(
                    "{}{}{}",
                    stash.hold(open.to_string()),
                    inner,
                    stash.hold(close.to_string())
                )
            })
            .into_owned()
    }

    fn code_spans(&self, text: &str, stash: &mut Stash) -> String {
        CODE.replace_all(text, |caps: &Captures| {
            let inner = &caps[1];
            match self.target {
                InlineTarget::Html => stash.hold(format!(
                    "<code>{}</code>",
                    html_escape::encode_text(inner)
                )),
                InlineTarget::Markdown => stash.hold(format!("`{}`", inner)),
                InlineTarget::Plain => stash.hold(inner.to_string()),
            }
        })
        .into_owned()
    }
}

/// Rewrite inline markers in `text` for `target`.
pub fn format_inline(text: &str, target: InlineTarget, options: &TranspileOptions) -> String {
    InlineFormatter::new(target, options).format(text)
}

/// Remove inline markers, keeping link labels, image alt text, and the text
/// inside emphasis and code spans.
pub fn strip_inline(text: &str) -> String {
    format_inline(text, InlineTarget::Plain, &TranspileOptions::default())
}

/// Markup pieces parked during formatting.
#[derive(Default)]
struct Stash {
    pieces: Vec<String>,
}

impl Stash {
    fn hold(&mut self, piece: String) -> String {
        let index = self.pieces.len();
        self.pieces.push(piece);
        format!("{OPEN}{index}{CLOSE}")
    }

    fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Expands tokens below `limit`. A piece only ever contains tokens created
    /// before it, so recursion always moves to smaller indices.
    fn expand(&self, text: &str, limit: usize) -> String {
        TOKEN
            .replace_all(text, |caps: &Captures| {
                match caps[1].parse::<usize>() {
                    Ok(index) if index < limit => self.expand(&self.pieces[index], index),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(text: &str) -> String {
        format_inline(text, InlineTarget::Html, &TranspileOptions::default())
    }

    fn md(text: &str) -> String {
        format_inline(text, InlineTarget::Markdown, &TranspileOptions::default())
    }

    #[test]
    fn formatter_reports_its_target() {
        let options = TranspileOptions::default();
        for target in [InlineTarget::Html, InlineTarget::Markdown, InlineTarget::Plain] {
            assert_eq!(InlineFormatter::new(target, &options).target(), target);
        }
    }

    #[test]
    fn plain_text_is_untouched() {
        for text in ["", "hello world", "a < b & c > d", "1 + 1 = 2 (really)", "café #1"] {
            assert_eq!(html(text), text);
            assert_eq!(md(text), text);
            assert_eq!(strip_inline(text), text);
        }
    }

    #[test]
    fn bold_then_italic() {
        assert_eq!(
            html("**bold** and *it* and __b2__ and _i2_"),
            "<strong>bold</strong> and <em>it</em> and <strong>b2</strong> and <em>i2</em>"
        );
    }

    #[test]
    fn italic_does_not_rematch_bold_markers_in_markdown() {
        assert_eq!(md("**bold** and _it_"), "**bold** and *it*");
        assert_eq!(md("__b__"), "**b**");
    }

    #[test]
    fn link_gets_safe_rel() {
        assert_eq!(
            html("see [docs](https://x.com/a_b_c)"),
            r#"see <a href="https://x.com/a_b_c" target="_blank" rel="noopener noreferrer">docs</a>"#
        );
    }

    #[test]
    fn link_label_still_formatted() {
        assert_eq!(
            html("[**big**](/x)"),
            r#"<a href="/x" target="_blank" rel="noopener noreferrer"><strong>big</strong></a>"#
        );
        assert_eq!(md("[__big__](/x)"), "[**big**](/x)");
    }

    #[test]
    fn image_src_is_normalized() {
        assert_eq!(
            html("![a cat](cats/1.png)"),
            r#"<img src="/cats/1.png" alt="a cat" />"#
        );
        assert_eq!(md("![](  )"), "![](https://placehold.co/800x600.png)");
    }

    #[test]
    fn image_alt_is_not_emphasized() {
        assert_eq!(
            html("![snake_case_name](a.png)"),
            r#"<img src="/a.png" alt="snake_case_name" />"#
        );
    }

    #[test]
    fn strike_and_code() {
        assert_eq!(html("~~old~~ `x<y`"), "<del>old</del> <code>x&lt;y</code>");
        assert_eq!(md("~~old~~ `x`"), "~~old~~ `x`");
    }

    #[test]
    fn strip_keeps_readable_text() {
        assert_eq!(
            strip_inline("Hello **world**, see [docs](/d) and `code` ~~gone~~"),
            "Hello world, see docs and code gone"
        );
        assert_eq!(strip_inline("![Cat](c.png) photo"), "Cat photo");
    }

    #[test]
    fn sentinel_characters_survive() {
        let text = "odd \u{E000}0\u{E001} chars **b**";
        assert_eq!(
            html(text),
            "odd \u{E000}0\u{E001} chars <strong>b</strong>"
        );
    }

    #[test]
    fn unmatched_markers_pass_through() {
        assert_eq!(html("a * b"), "a * b");
        assert_eq!(html("[not a link]"), "[not a link]");
        assert_eq!(html("~single~"), "~single~");
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(
            html(r#"[x](/a"b)"#),
            r#"<a href="/a&quot;b" target="_blank" rel="noopener noreferrer">x</a>"#
        );
    }
}
