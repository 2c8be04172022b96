//! Sanity portable text to content blocks.
//!
//! Text spans are re-encoded with the inline markers the transpiler
//! understands, so a Sanity post renders exactly like a Firestore one.

use folio_core::{ContentBlock, ImageRef};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Turns an image asset reference into a URL.
pub trait AssetResolver {
    /// URL for `asset_ref`, or `None` when it cannot be resolved.
    fn resolve(&self, asset_ref: &str) -> Option<String>;
}

impl<F> AssetResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, asset_ref: &str) -> Option<String> {
        (self)(asset_ref)
    }
}

/// Resolves `image-<id>-<w>x<h>-<ext>` references against the Sanity CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanityAssets {
    /// Sanity project id.
    pub project_id: String,
    /// Dataset name, e.g. `production`.
    pub dataset: String,
}

impl SanityAssets {
    /// Resolver for one project and dataset.
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }
}

impl AssetResolver for SanityAssets {
    fn resolve(&self, asset_ref: &str) -> Option<String> {
        let rest = asset_ref.strip_prefix("image-")?;
        let mut parts = rest.rsplitn(3, '-');
        let ext = parts.next()?;
        let dims = parts.next()?;
        let id = parts.next()?;

        let (w, h) = dims.split_once('x')?;
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if id.is_empty() || ext.is_empty() || !numeric(w) || !numeric(h) {
            return None;
        }

        Some(format!(
            "https://cdn.sanity.io/images/{}/{}/{}-{}.{}",
            self.project_id, self.dataset, id, dims, ext
        ))
    }
}

/// Converts a portable text array into content blocks. Entries of unknown
/// shape are skipped.
pub fn normalize_portable_text(content: &[Value], assets: &dyn AssetResolver) -> Vec<ContentBlock> {
    content
        .iter()
        .filter_map(|entry| {
            let block = normalize_entry(entry, assets);
            if block.is_none() {
                log::debug!(
                    "skipping portable text entry of type {:?}",
                    entry.get("_type").and_then(Value::as_str)
                );
            }
            block
        })
        .collect()
}

fn normalize_entry(entry: &Value, assets: &dyn AssetResolver) -> Option<ContentBlock> {
    let map = entry.as_object()?;
    match map.get("_type").and_then(Value::as_str)? {
        "block" => text_block(map),
        "code" => {
            let code = map.get("code").and_then(Value::as_str)?;
            Some(ContentBlock::Code {
                code: code.to_string(),
                language: map
                    .get("language")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        }
        "image" => Some(ContentBlock::Images(vec![image_ref(map, assets)])),
        _ => None,
    }
}

fn text_block(map: &Map<String, Value>) -> Option<ContentBlock> {
    let text = spans_to_markers(map);
    if text.trim().is_empty() {
        return None;
    }

    if let Some(list) = map.get("listItem").and_then(Value::as_str) {
        return Some(match list {
            "number" => ContentBlock::numbered(text),
            _ => ContentBlock::bullet(text),
        });
    }

    let style = map.get("style").and_then(Value::as_str).unwrap_or("normal");
    let heading = style
        .strip_prefix('h')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=6).contains(n));

    Some(match (style, heading) {
        (_, Some(depth)) => ContentBlock::text(format!("{} {}", "#".repeat(depth), text)),
        ("blockquote", None) => ContentBlock::quote(text),
        _ => ContentBlock::text(text),
    })
}

fn spans_to_markers(map: &Map<String, Value>) -> String {
    let links: HashMap<&str, &str> = map
        .get("markDefs")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|def| def.get("_type").and_then(Value::as_str) == Some("link"))
        .filter_map(|def| {
            Some((
                def.get("_key")?.as_str()?,
                def.get("href")?.as_str()?,
            ))
        })
        .collect();

    let mut out = String::new();
    for span in map
        .get("children")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        let Some(text) = span.get("text").and_then(Value::as_str) else {
            continue;
        };
        let marks: Vec<&str> = span
            .get("marks")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .collect();
        out.push_str(&mark_span(text, &marks, &links));
    }
    out
}

/// Wraps the non-whitespace core of `text` in markers; surrounding whitespace
/// stays outside so the markers remain valid.
fn mark_span(text: &str, marks: &[&str], links: &HashMap<&str, &str>) -> String {
    let core = text.trim();
    if core.is_empty() || marks.is_empty() {
        return text.to_string();
    }
    let lead = &text[..text.len() - text.trim_start().len()];
    let trail = &text[text.trim_end().len()..];

    let mut wrapped = core.to_string();
    for (mark, marker) in [
        ("code", "`"),
        ("strike-through", "~~"),
        ("em", "_"),
        ("strong", "**"),
    ] {
        if marks.contains(&mark) {
            wrapped = format!("{marker}{wrapped}{marker}");
        }
    }
    if let Some(href) = marks.iter().find_map(|m| links.get(m)) {
        wrapped = format!("[{wrapped}]({href})");
    }

    format!("{lead}{wrapped}{trail}")
}

fn image_ref(map: &Map<String, Value>, assets: &dyn AssetResolver) -> ImageRef {
    let asset = map.get("asset");
    let url = asset
        .and_then(|a| a.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            asset
                .and_then(|a| a.get("_ref"))
                .and_then(Value::as_str)
                .and_then(|r| assets.resolve(r))
        });
    let name = ["alt", "caption"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);
    ImageRef { url, name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::transpile;
    use serde_json::json;

    fn assets() -> SanityAssets {
        SanityAssets::new("abc123", "production")
    }

    #[test]
    fn resolves_image_refs() {
        assert_eq!(
            assets().resolve("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg"),
            Some(
                "https://cdn.sanity.io/images/abc123/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
                    .to_string()
            )
        );
        assert_eq!(assets().resolve("file-abc-pdf"), None);
        assert_eq!(assets().resolve("image-abc-big-png"), None);
    }

    #[test]
    fn styles_and_lists() {
        let content = vec![
            json!({"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Setup"}]}),
            json!({"_type": "block", "style": "blockquote", "children": [{"text": "wise words"}]}),
            json!({"_type": "block", "listItem": "bullet", "children": [{"text": "one"}]}),
            json!({"_type": "block", "listItem": "number", "children": [{"text": "two"}]}),
            json!({"_type": "block", "style": "normal", "children": [{"text": "  "}]}),
            json!({"_type": "youtube", "url": "https://y.tube/x"}),
        ];
        assert_eq!(
            normalize_portable_text(&content, &assets()),
            vec![
                ContentBlock::text("## Setup"),
                ContentBlock::quote("wise words"),
                ContentBlock::bullet("one"),
                ContentBlock::numbered("two"),
            ]
        );
    }

    #[test]
    fn marks_become_inline_markers() {
        let content = vec![json!({
            "_type": "block",
            "markDefs": [{"_key": "l1", "_type": "link", "href": "https://x.com"}],
            "children": [
                {"text": "Read "},
                {"text": "this ", "marks": ["strong"]},
                {"text": "guide", "marks": ["em", "l1"]},
                {"text": " or run "},
                {"text": "cargo", "marks": ["code"]},
            ],
        })];
        let blocks = normalize_portable_text(&content, &assets());
        assert_eq!(
            blocks,
            vec![ContentBlock::text("Read **this** [_guide_](https://x.com) or run `cargo`")]
        );
        assert_eq!(
            transpile(&blocks).content,
            r#"<p>Read <strong>this</strong> <a href="https://x.com" target="_blank" rel="noopener noreferrer"><em>guide</em></a> or run <code>cargo</code></p>"#
        );
    }

    #[test]
    fn bold_italic_spans_nest_cleanly() {
        let content = vec![json!({
            "_type": "block",
            "children": [
                {"text": "very", "marks": ["strong", "em"]},
                {"text": " important"},
            ],
        })];
        let blocks = normalize_portable_text(&content, &assets());
        assert_eq!(blocks, vec![ContentBlock::text("**_very_** important")]);
        assert_eq!(
            transpile(&blocks).content,
            "<p><strong><em>very</em></strong> important</p>"
        );
    }

    #[test]
    fn code_and_images() {
        let content = vec![
            json!({"_type": "code", "code": "ls -la", "language": "sh"}),
            json!({"_type": "image", "asset": {"_ref": "image-xyz-10x20-png"}, "alt": "Diagram"}),
            json!({"_type": "image", "asset": {"url": "https://cdn.example.com/a.webp"}, "caption": "Cap"}),
            json!({"_type": "image", "asset": {"_ref": "nonsense"}}),
        ];
        let blocks = normalize_portable_text(&content, &assets());
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Code {
                    code: "ls -la".into(),
                    language: Some("sh".into()),
                },
                ContentBlock::Images(vec![ImageRef::named(
                    "https://cdn.sanity.io/images/abc123/production/xyz-10x20.png",
                    "Diagram"
                )]),
                ContentBlock::Images(vec![ImageRef::named("https://cdn.example.com/a.webp", "Cap")]),
                ContentBlock::Images(vec![ImageRef::default()]),
            ]
        );
    }

    #[test]
    fn closures_resolve_assets() {
        let resolver = |r: &str| Some(format!("/assets/{r}"));
        let blocks = normalize_portable_text(
            &[json!({"_type": "image", "asset": {"_ref": "k"}})],
            &resolver,
        );
        assert_eq!(blocks, vec![ContentBlock::Images(vec![ImageRef::url("/assets/k")])]);
    }
}
