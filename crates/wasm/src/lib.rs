use chrono::{DateTime, Utc};
use folio_cms::{FirestoreDocument, PostMapper};
use folio_core::{HeadingEntry, OutlineNode, TranspileOptions, normalize_url_value, transpile_value};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Options
// ============================================================================

fn parse_options(options: JsValue) -> Result<TranspileOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(TranspileOptions::default());
    }
    let options: TranspileOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    options
        .validated()
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn to_json_value(value: JsValue) -> serde_json::Value {
    if value.is_undefined() || value.is_null() {
        return serde_json::Value::Null;
    }
    serde_wasm_bindgen::from_value(value).unwrap_or(serde_json::Value::Null)
}

// Plain objects rather than `Map`s, so flattened outline nodes read naturally.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

// ============================================================================
// Transpile API
// ============================================================================

/// Result of transpiling a block array.
#[derive(Debug, Clone, Serialize)]
pub struct TranspileResult {
    /// Rendered body.
    pub content: String,
    /// Plain-text summary.
    pub summary: String,
    /// Every heading, in document order.
    pub headings: Vec<HeadingEntry>,
    /// Headings nested for a table of contents.
    pub outline: Vec<OutlineNode>,
}

/// Transpiles a CMS content array into a document body and summary.
///
/// `blocks` is the raw `content` array; malformed entries are skipped rather
/// than reported. `options` is an optional object of transpile options, with
/// camelCase or snake_case keys.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { transpile } from './folio_wasm';
///
/// const { content, summary } = transpile(
///   [{ type: 'text', value: '# Hi\nHello **there**' }],
///   { format: 'html' },
/// );
/// // content = '<h1 id="hi">Hi</h1><p>Hello <strong>there</strong></p>'
/// // summary = 'Hi Hello there'
/// ```
#[wasm_bindgen]
pub fn transpile(blocks: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let rendered = transpile_value(&to_json_value(blocks), &options);
    let outline = rendered.outline(options.toc_max_depth);

    to_js(&TranspileResult {
        content: rendered.content,
        summary: rendered.summary,
        headings: rendered.headings,
        outline,
    })
}

// ============================================================================
// CMS API
// ============================================================================

/// Maps a Firestore `{ id, data }` document onto a blog post. Documents
/// without a publish date are stamped with the current time.
#[wasm_bindgen(js_name = mapFirestorePost)]
pub fn map_firestore_post(doc: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let doc: FirestoreDocument = serde_wasm_bindgen::from_value(doc)
        .map_err(|e| JsError::new(&format!("Invalid document: {}", e)))?;

    let post = PostMapper::new(now())
        .with_options(options)
        .map(&doc)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&post)
}

/// Normalizes an image reference: absolute and root-relative URLs pass
/// through, bare paths gain a leading `/`, anything else becomes the
/// placeholder image.
#[wasm_bindgen(js_name = normalizeUrl)]
pub fn normalize_url(value: JsValue) -> String {
    normalize_url_value(&to_json_value(value))
}
