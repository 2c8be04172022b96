use std::collections::HashMap;

/// Hands out unique heading slugs for one document.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates an empty slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slug for `text`, suffixing `-1`, `-2`, ... until the
    /// result has not been handed out before.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        while self.seen.contains_key(&candidate) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{}-{}", base, count);
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}

/// Slug for a single heading, without deduplication.
///
/// Lowercases, keeps letters, digits, `-` and `_`, turns each space into `-`
/// and drops everything else. Falls back to `heading` when nothing is left.
///
/// ```
/// use folio_core::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("???"), "heading");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            slug.extend(ch.to_lowercase());
        } else if ch == ' ' {
            slug.push('-');
        }
    }
    if slug.is_empty() {
        slug.push_str("heading");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_dropped() {
        assert_eq!(slugify("What's new in v2.0?"), "whats-new-in-v20");
    }

    #[test]
    fn repeats_are_suffixed() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-1");
        assert_eq!(slugger.slug("intro"), "intro-2");
        assert_eq!(slugger.slug("Outro"), "outro");
    }

    #[test]
    fn suffixed_slugs_never_collide_with_later_headings() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("Setup 1"), "setup-1-1");
        assert_eq!(slugger.slug("Setup"), "setup-2");

        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Setup 1"), "setup-1");
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-2");
    }

    #[test]
    fn unicode_letters_kept() {
        assert_eq!(slugify("Über Café"), "über-café");
        assert_eq!(slugify("多言語 ガイド"), "多言語-ガイド");
    }

    #[test]
    fn inner_spaces_not_collapsed() {
        assert_eq!(slugify("  a  b "), "a--b");
    }
}
