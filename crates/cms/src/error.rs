use folio_core::FolioError;
use thiserror::Error;

/// Errors raised while mapping CMS documents.
#[derive(Debug, Error)]
pub enum CmsError {
    /// The document source was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The document's `data` was missing or not an object.
    #[error("Document `{id}` has no data object")]
    MissingData {
        /// Document id.
        id: String,
    },
    /// Failure reported by the transpiler's parsing entry points.
    #[error(transparent)]
    Core(#[from] FolioError),
}

impl CmsError {
    /// Create a missing-data error for `id`.
    pub fn missing_data(id: impl Into<String>) -> Self {
        Self::MissingData { id: id.into() }
    }
}
