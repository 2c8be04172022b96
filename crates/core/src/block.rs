//! Content block model and lenient decoding from CMS JSON.
//!
//! CMS payloads are loosely typed: fields go missing, values arrive with the
//! wrong type, and new block types appear without notice. Decoding never
//! fails. A wrong-typed `value` decodes to an empty payload and a record
//! without a string `type` is dropped.

use crate::error::TranspileDiagnostics;
use crate::FolioError;
use serde_json::Value;

/// Which list container a list item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// `bullet_list_item`
    Bullet,
    /// `numbered_list_item`
    Numbered,
    /// `todo_list_item`
    Todo,
}

impl ListKind {
    /// Wire name of the block type.
    pub fn type_name(self) -> &'static str {
        match self {
            ListKind::Bullet => "bullet_list_item",
            ListKind::Numbered => "numbered_list_item",
            ListKind::Todo => "todo_list_item",
        }
    }
}

/// One image reference inside an `images` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    /// Source URL or path, if one was given.
    pub url: Option<String>,
    /// Display name, used as alt text.
    pub name: Option<String>,
}

impl ImageRef {
    /// Image with a URL and no name.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            name: None,
        }
    }

    /// Image with a URL and a name.
    pub fn named(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            name: Some(name.into()),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(url) => Self::url(url.as_str()),
            Value::Object(map) => Self {
                url: map.get("url").and_then(Value::as_str).map(str::to_string),
                name: map.get("name").and_then(Value::as_str).map(str::to_string),
            },
            _ => Self::default(),
        }
    }
}

/// One discriminated unit of authored content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Paragraphs and `#` headings separated by newlines.
    Text(String),
    /// A blockquote.
    Quote(String),
    /// Preformatted code, never inline-processed.
    Code {
        /// Raw source text.
        code: String,
        /// Language hint, when the CMS provides one.
        language: Option<String>,
    },
    /// One item of a bullet, numbered, or todo list.
    ListItem {
        /// Container the item belongs to.
        kind: ListKind,
        /// Item text with inline markers.
        text: String,
        /// Completion state; only meaningful for todo items.
        checked: bool,
    },
    /// One or more images.
    Images(Vec<ImageRef>),
    /// A block type the transpiler does not know.
    Unknown {
        /// The unrecognized `type` tag.
        kind: String,
        /// String payload, empty when the value was not a string.
        text: String,
    },
}

impl ContentBlock {
    /// `text` block.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// `quote` block.
    pub fn quote(value: impl Into<String>) -> Self {
        Self::Quote(value.into())
    }

    /// `code` block without a language.
    pub fn code(value: impl Into<String>) -> Self {
        Self::Code {
            code: value.into(),
            language: None,
        }
    }

    /// `bullet_list_item` block.
    pub fn bullet(value: impl Into<String>) -> Self {
        Self::list_item(ListKind::Bullet, value, false)
    }

    /// `numbered_list_item` block.
    pub fn numbered(value: impl Into<String>) -> Self {
        Self::list_item(ListKind::Numbered, value, false)
    }

    /// `todo_list_item` block.
    pub fn todo(value: impl Into<String>, checked: bool) -> Self {
        Self::list_item(ListKind::Todo, value, checked)
    }

    fn list_item(kind: ListKind, value: impl Into<String>, checked: bool) -> Self {
        Self::ListItem {
            kind,
            text: value.into(),
            checked,
        }
    }

    /// The wire `type` tag for this block.
    pub fn type_name(&self) -> &str {
        match self {
            ContentBlock::Text(_) => "text",
            ContentBlock::Quote(_) => "quote",
            ContentBlock::Code { .. } => "code",
            ContentBlock::ListItem { kind, .. } => kind.type_name(),
            ContentBlock::Images(_) => "images",
            ContentBlock::Unknown { kind, .. } => kind,
        }
    }

    /// List kind, if this block is a list item.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            ContentBlock::ListItem { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Decode one CMS record. Returns `None` when the record has no string
    /// `type` tag.
    pub fn from_value(record: &Value) -> Option<Self> {
        let kind = record.get("type")?.as_str()?;
        let value = record.get("value").unwrap_or(&Value::Null);
        let text = || value.as_str().unwrap_or_default().to_string();

        let block = match kind {
            "text" => Self::Text(text()),
            "quote" => Self::Quote(text()),
            "code" => Self::Code {
                code: text(),
                language: record
                    .get("language")
                    .and_then(Value::as_str)
                    .filter(|lang| !lang.trim().is_empty())
                    .map(|lang| lang.trim().to_string()),
            },
            "bullet_list_item" => Self::bullet(text()),
            "numbered_list_item" => Self::numbered(text()),
            "todo_list_item" => Self::todo(
                text(),
                record.get("checked").is_some_and(is_truthy),
            ),
            "images" => Self::Images(match value {
                Value::Array(items) => items.iter().map(ImageRef::from_value).collect(),
                Value::String(url) => vec![ImageRef::url(url.as_str())],
                _ => Vec::new(),
            }),
            other => Self::Unknown {
                kind: other.to_string(),
                text: text(),
            },
        };
        Some(block)
    }
}

/// Decodes a JSON array of records. Anything other than an array yields no
/// blocks.
pub fn decode_blocks(value: &Value) -> Vec<ContentBlock> {
    decode_blocks_with_diagnostics(value, &mut TranspileDiagnostics::new())
}

/// Like [`decode_blocks`], recording every dropped record.
pub fn decode_blocks_with_diagnostics(
    value: &Value,
    diagnostics: &mut TranspileDiagnostics,
) -> Vec<ContentBlock> {
    let Some(records) = value.as_array() else {
        if !value.is_null() {
            diagnostics.warn_at(0, "content is not an array of blocks");
        }
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let block = ContentBlock::from_value(record);
            if block.is_none() {
                diagnostics.warn_at(index, "record has no string `type`; skipped");
            }
            block
        })
        .collect()
}

/// Parses a JSON document holding an array of records.
pub fn parse_blocks(json: &str) -> Result<Vec<ContentBlock>, FolioError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(decode_blocks(&value))
}

/// JavaScript truthiness for a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
