use super::{Emitter, ListEntry};
use crate::block::ListKind;
use crate::inline::InlineTarget;
use html_escape::{encode_double_quoted_attribute, encode_quoted_attribute};

/// Writes an HTML fragment with no separators between blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEmitter;

impl Emitter for HtmlEmitter {
    fn inline_target(&self) -> InlineTarget {
        InlineTarget::Html
    }

    fn heading(&self, depth: u8, id: Option<&str>, body: &str) -> String {
        match id {
            Some(id) => format!(
                r#"<h{depth} id="{}">{body}</h{depth}>"#,
                encode_double_quoted_attribute(id)
            ),
            None => format!("<h{depth}>{body}</h{depth}>"),
        }
    }

    fn paragraph(&self, body: &str) -> String {
        format!("<p>{body}</p>")
    }

    fn blockquote(&self, body: &str) -> String {
        format!("<blockquote><p>{body}</p></blockquote>")
    }

    fn code_block(&self, code: &str, language: Option<&str>) -> String {
        // Escapes & < > " ' so the code can never be read as markup.
        let escaped = encode_quoted_attribute(code);
        match language {
            Some(lang) => format!(
                r#"<pre><code class="language-{}">{escaped}</code></pre>"#,
                encode_double_quoted_attribute(lang)
            ),
            None => format!("<pre><code>{escaped}</code></pre>"),
        }
    }

    fn list(&self, kind: ListKind, items: &[ListEntry]) -> String {
        let (open, close) = match kind {
            ListKind::Bullet => ("<ul>", "</ul>"),
            ListKind::Numbered => ("<ol>", "</ol>"),
            ListKind::Todo => (r#"<ul class="todo-list">"#, "</ul>"),
        };

        let mut out = String::from(open);
        for item in items {
            match kind {
                ListKind::Todo if item.checked => {
                    out.push_str(r#"<li class="todo-item"><input type="checkbox" checked disabled /><span class="done">"#);
                    out.push_str(&item.body);
                    out.push_str("</span></li>");
                }
                ListKind::Todo => {
                    out.push_str(r#"<li class="todo-item"><input type="checkbox" disabled /><span>"#);
                    out.push_str(&item.body);
                    out.push_str("</span></li>");
                }
                _ => {
                    out.push_str("<li>");
                    out.push_str(&item.body);
                    out.push_str("</li>");
                }
            }
        }
        out.push_str(close);
        out
    }

    fn image(&self, src: &str, alt: &str) -> String {
        format!(
            r#"<figure><img src="{}" alt="{}" /></figure>"#,
            encode_double_quoted_attribute(src),
            encode_double_quoted_attribute(alt)
        )
    }

    fn separator(&self) -> &'static str {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(body: &str, checked: bool) -> ListEntry {
        ListEntry {
            body: body.to_string(),
            checked,
        }
    }

    #[test]
    fn heading_with_and_without_id() {
        assert_eq!(HtmlEmitter.heading(2, Some("intro"), "Intro"), r#"<h2 id="intro">Intro</h2>"#);
        assert_eq!(HtmlEmitter.heading(6, None, "x"), "<h6>x</h6>");
    }

    #[test]
    fn code_is_escaped_with_language_class() {
        assert_eq!(
            HtmlEmitter.code_block("a<b && \"c\"", Some("rust")),
            r#"<pre><code class="language-rust">a&lt;b &amp;&amp; &quot;c&quot;</code></pre>"#
        );
    }

    #[test]
    fn todo_items_reflect_checked_state() {
        let html = HtmlEmitter.list(ListKind::Todo, &[entry("done", true), entry("open", false)]);
        assert_eq!(
            html,
            concat!(
                r#"<ul class="todo-list">"#,
                r#"<li class="todo-item"><input type="checkbox" checked disabled /><span class="done">done</span></li>"#,
                r#"<li class="todo-item"><input type="checkbox" disabled /><span>open</span></li>"#,
                "</ul>"
            )
        );
    }

    #[test]
    fn numbered_list_uses_ol() {
        assert_eq!(
            HtmlEmitter.list(ListKind::Numbered, &[entry("a", false)]),
            "<ol><li>a</li></ol>"
        );
    }
}
