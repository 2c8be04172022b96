use super::{Emitter, ListEntry};
use crate::block::ListKind;
use crate::inline::InlineTarget;

/// Writes CommonMark/GFM with a blank line between blocks.
///
/// Todo items use `*` so a todo run directly after a bullet run stays a
/// separate list.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownEmitter;

impl Emitter for MarkdownEmitter {
    fn inline_target(&self) -> InlineTarget {
        InlineTarget::Markdown
    }

    fn heading(&self, depth: u8, _id: Option<&str>, body: &str) -> String {
        format!("{} {}", "#".repeat(depth as usize), body)
    }

    fn paragraph(&self, body: &str) -> String {
        body.to_string()
    }

    fn blockquote(&self, body: &str) -> String {
        body.lines()
            .map(|line| {
                if line.trim().is_empty() {
                    ">".to_string()
                } else {
                    format!("> {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn code_block(&self, code: &str, language: Option<&str>) -> String {
        let fence = "`".repeat(fence_length(code));
        let body = code.strip_suffix('\n').unwrap_or(code);
        format!("{fence}{}\n{body}\n{fence}", language.unwrap_or_default())
    }

    fn list(&self, kind: ListKind, items: &[ListEntry]) -> String {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = match kind {
                    ListKind::Bullet => "-".to_string(),
                    ListKind::Numbered => format!("{}.", i + 1),
                    ListKind::Todo if item.checked => "* [x]".to_string(),
                    ListKind::Todo => "* [ ]".to_string(),
                };
                let indent = " ".repeat(marker.len() + 1);
                let body = item.body.replace('\n', &format!("\n{indent}"));
                format!("{marker} {body}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn image(&self, src: &str, alt: &str) -> String {
        format!("![{alt}]({src})")
    }

    fn separator(&self) -> &'static str {
        "\n\n"
    }
}

/// Shortest backtick fence (at least three) longer than any backtick run in
/// `code`.
fn fence_length(code: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for ch in code.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    (longest + 1).max(3)
}
