use folio_wasm::{map_firestore_post, normalize_url, transpile};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct TranspileResult {
    content: String,
    summary: String,
    headings: Vec<HeadingEntry>,
    outline: Vec<OutlineNode>,
}

#[derive(Deserialize, Debug)]
struct HeadingEntry {
    depth: u8,
    slug: String,
    text: String,
}

#[derive(Deserialize, Debug)]
struct OutlineNode {
    slug: String,
    children: Vec<OutlineNode>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BlogPost {
    slug: String,
    title: String,
    date: String,
    content: String,
    image: String,
    ai_hint: String,
}

fn js(json: &str) -> JsValue {
    js_sys::JSON::parse(json).expect("valid JSON")
}

#[wasm_bindgen_test]
fn transpile_basic_blocks() {
    let blocks = js(r##"[
        {"type": "text", "value": "# Hello World\nThis is **bold** text."},
        {"type": "bullet_list_item", "value": "one"},
        {"type": "bullet_list_item", "value": "two"}
    ]"##);
    let result = transpile(blocks, JsValue::UNDEFINED).expect("transpile should succeed");
    let result: TranspileResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(
        result.content,
        r#"<h1 id="hello-world">Hello World</h1><p>This is <strong>bold</strong> text.</p><ul><li>one</li><li>two</li></ul>"#
    );
    assert_eq!(result.summary, "Hello World This is bold text. one two");
    assert_eq!(result.headings.len(), 1);
    assert_eq!(result.headings[0].depth, 1);
    assert_eq!(result.headings[0].slug, "hello-world");
    assert_eq!(result.headings[0].text, "Hello World");
}

#[wasm_bindgen_test]
fn transpile_builds_outline() {
    let blocks = js(r##"[{"type": "text", "value": "# A\n## B\n### C\n#### D\n## E"}]"##);
    let result = transpile(blocks, JsValue::NULL).expect("transpile should succeed");
    let result: TranspileResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(result.headings.len(), 5);
    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].slug, "a");
    let children: Vec<&str> = result.outline[0]
        .children
        .iter()
        .map(|n| n.slug.as_str())
        .collect();
    assert_eq!(children, vec!["b", "e"]);
    // Depth 4 is past the default outline depth.
    assert!(result.outline[0].children[0].children[0].children.is_empty());
}

#[wasm_bindgen_test]
fn transpile_markdown_with_camel_case_options() {
    let blocks = js(r#"[{"type": "quote", "value": "wise"}, {"type": "code", "value": "x"}]"#);
    let options = js(r#"{"format": "markdown", "includeCodeInSummary": true}"#);
    let result = transpile(blocks, options).expect("transpile should succeed");
    let result: TranspileResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");

    assert_eq!(result.content, "> wise\n\n```\nx\n```");
    assert_eq!(result.summary, "wise x");
}

#[wasm_bindgen_test]
fn transpile_is_total_for_odd_input() {
    for input in [JsValue::UNDEFINED, js("42"), js(r#"[{"value": "no type"}, 7]"#)] {
        let result = transpile(input, JsValue::UNDEFINED).expect("transpile should succeed");
        let result: TranspileResult = serde_wasm_bindgen::from_value(result).expect("deserialize result");
        assert_eq!(result.content, "");
        assert_eq!(result.summary, "No summary available.");
    }
}

#[wasm_bindgen_test]
fn transpile_rejects_invalid_options() {
    assert!(transpile(js("[]"), js(r#"{"tocMaxDepth": 9}"#)).is_err());
    assert!(transpile(js("[]"), js(r#"{"format": "pdf"}"#)).is_err());
}

#[wasm_bindgen_test]
fn map_firestore_post_document() {
    let doc = js(r#"{
        "id": "first-post",
        "data": {
            "name": "First Post Ever",
            "publish_date": "2024-05-01T10:00:00Z",
            "header_image": "img/header.jpg",
            "content": [{"type": "text", "value": "Hi"}]
        }
    }"#);
    let post = map_firestore_post(doc, JsValue::UNDEFINED).expect("map should succeed");
    let post: BlogPost = serde_wasm_bindgen::from_value(post).expect("deserialize post");

    assert_eq!(post.slug, "first-post");
    assert_eq!(post.title, "First Post Ever");
    assert_eq!(post.date, "2024-05-01T10:00:00.000Z");
    assert_eq!(post.content, "<p>Hi</p>");
    assert_eq!(post.image, "/img/header.jpg");
    assert_eq!(post.ai_hint, "first post");
}

#[wasm_bindgen_test]
fn map_firestore_post_without_data_fails() {
    assert!(map_firestore_post(js(r#"{"id": "x", "data": 3}"#), JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn normalize_url_values() {
    assert_eq!(normalize_url(JsValue::from_str("a/b.png")), "/a/b.png");
    assert_eq!(
        normalize_url(JsValue::from_str("https://x.com/i.png")),
        "https://x.com/i.png"
    );
    assert_eq!(normalize_url(JsValue::NULL), "https://placehold.co/800x600.png");
    assert_eq!(normalize_url(JsValue::from_f64(3.0)), "https://placehold.co/800x600.png");
}
