//! Image and asset URL normalization.

use crate::options::{PLACEHOLDER_IMAGE_URL, TranspileOptions};
use serde_json::Value;

/// Normalizes a possibly-missing URL with the default placeholder and no
/// asset base.
///
/// ```
/// use folio_core::normalize_url;
///
/// assert_eq!(normalize_url(Some("images/a.png")), "/images/a.png");
/// assert_eq!(normalize_url(Some("https://x.com/a.png")), "https://x.com/a.png");
/// assert_eq!(normalize_url(None), "https://placehold.co/800x600.png");
/// ```
pub fn normalize_url(raw: Option<&str>) -> String {
    resolve(raw, PLACEHOLDER_IMAGE_URL, None)
}

/// Normalizes a JSON value; anything other than a non-blank string yields the
/// placeholder.
pub fn normalize_url_value(raw: &Value) -> String {
    normalize_url(raw.as_str())
}

/// Normalizes a URL using the placeholder and asset base from `options`.
pub fn resolve_url(raw: Option<&str>, options: &TranspileOptions) -> String {
    resolve(raw, &options.placeholder_image, options.asset_base.as_deref())
}

/// Whether `raw` would be replaced by the placeholder.
pub fn is_missing(raw: Option<&str>) -> bool {
    raw.is_none_or(|s| s.trim().is_empty())
}

fn resolve(raw: Option<&str>, placeholder: &str, asset_base: Option<&str>) -> String {
    let trimmed = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return placeholder.to_string(),
    };

    if trimmed.starts_with("http") || trimmed.starts_with('/') {
        return trimmed.to_string();
    }

    match asset_base.map(|base| base.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => format!("{}/{}", base, trimmed),
        _ => format!("/{}", trimmed),
    }
}
