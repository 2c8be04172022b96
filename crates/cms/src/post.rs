//! Maps Firestore `blogPosts` documents onto rendered blog posts.

use crate::CmsError;
use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::{HeadingEntry, TranspileOptions, normalize_url_value, transpile_value};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Title used when a document has no usable `name`.
pub const UNTITLED_POST: &str = "Untitled Post";
/// Image hint used when the title yields no words.
pub const DEFAULT_AI_HINT: &str = "abstract";

/// Post author shown on cards and the article header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Search hint for a stock avatar image.
    pub ai_hint: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "Zura".to_string(),
            avatar: "https://placehold.co/100x100.png".to_string(),
            ai_hint: "person avatar".to_string(),
        }
    }
}

/// A fully rendered blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// URL slug; the document id.
    pub slug: String,
    /// Post title.
    pub title: String,
    /// Publish date, serialized as an ISO 8601 UTC timestamp with millis.
    #[serde(serialize_with = "iso_millis")]
    pub date: DateTime<Utc>,
    /// Plain-text teaser.
    pub summary: String,
    /// Rendered body.
    pub content: String,
    /// Headings in the body, for the table of contents.
    pub headings: Vec<HeadingEntry>,
    /// Category label, when the document has a string one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Author block.
    pub author: Author,
    /// Header image URL.
    pub image: String,
    /// Search hint for a stock header image.
    pub ai_hint: String,
}

fn iso_millis<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// A Firestore document as exported: its id plus the field map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirestoreDocument {
    /// Document id.
    pub id: String,
    /// Field map.
    #[serde(default)]
    pub data: Value,
}

impl FirestoreDocument {
    /// Create a document from an id and field map.
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Turns documents into posts with fixed options, author, and clock.
#[derive(Debug, Clone)]
pub struct PostMapper {
    options: TranspileOptions,
    author: Author,
    now: DateTime<Utc>,
}

impl PostMapper {
    /// Mapper with default options and author. `now` stands in for documents
    /// without a publish date.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            options: TranspileOptions::default(),
            author: Author::default(),
            now,
        }
    }

    /// Replace the transpile options.
    pub fn with_options(mut self, options: TranspileOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the transpile options with ones read from a YAML mapping.
    pub fn with_yaml_options(self, yaml: &str) -> Result<Self, CmsError> {
        Ok(self.with_options(TranspileOptions::from_yaml_str(yaml)?))
    }

    /// Replace the author block.
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    /// The transpile options in use.
    pub fn options(&self) -> &TranspileOptions {
        &self.options
    }

    /// Map one document. Fails only when `data` is not an object.
    pub fn map(&self, doc: &FirestoreDocument) -> Result<BlogPost, CmsError> {
        let Some(data) = doc.data.as_object() else {
            return Err(CmsError::missing_data(&doc.id));
        };

        let title = data
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNTITLED_POST)
            .to_string();

        let date = match data.get("publish_date") {
            None | Some(Value::Null) => self.now,
            Some(raw) => publish_date(raw).unwrap_or_else(|| {
                log::warn!(
                    "post `{}` has an unreadable publish_date; using current time",
                    doc.id
                );
                self.now
            }),
        };

        let rendered = transpile_value(data.get("content").unwrap_or(&Value::Null), &self.options);

        Ok(BlogPost {
            slug: doc.id.clone(),
            ai_hint: ai_hint(&title),
            title,
            date,
            summary: rendered.summary,
            content: rendered.content,
            headings: rendered.headings,
            category: data
                .get("category")
                .and_then(Value::as_str)
                .map(str::to_string),
            author: self.author.clone(),
            image: normalize_url_value(data.get("header_image").unwrap_or(&Value::Null)),
        })
    }

    /// Parse `{id, data}` JSON and map it.
    pub fn map_json(&self, json: &str) -> Result<BlogPost, CmsError> {
        let doc: FirestoreDocument = serde_json::from_str(json)?;
        self.map(&doc)
    }
}

/// Reads a publish date from an RFC 3339 string, a Firestore timestamp object
/// (`seconds`/`nanoseconds`, with or without a leading underscore), or Unix
/// milliseconds.
pub fn publish_date(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

/// First two words of the lowercased title, or `abstract`.
pub fn ai_hint(title: &str) -> String {
    let hint = title
        .to_lowercase()
        .split(' ')
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");
    if hint.is_empty() {
        DEFAULT_AI_HINT.to_string()
    } else {
        hint
    }
}

/// Orders posts newest first.
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Maps every document, dropping (and logging) the ones that fail, and returns
/// them newest first.
pub fn list_posts(docs: &[FirestoreDocument], mapper: &PostMapper) -> Vec<BlogPost> {
    log::debug!("mapping {} blog post document(s)", docs.len());
    let mut posts: Vec<BlogPost> = docs
        .iter()
        .filter_map(|doc| match mapper.map(doc) {
            Ok(post) => Some(post),
            Err(err) => {
                log::warn!("skipping post: {}", err);
                None
            }
        })
        .collect();
    sort_newest_first(&mut posts);
    posts
}

/// The post with `slug`, if any.
pub fn find_by_slug<'a>(posts: &'a [BlogPost], slug: &str) -> Option<&'a BlogPost> {
    posts.iter().find(|post| post.slug == slug)
}
