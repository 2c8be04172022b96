#![deny(missing_docs)]
//! Folio CMS adapters: map Firestore and Sanity documents onto content blocks
//! and finished blog posts.

/// Parallel batch mapping.
#[cfg(feature = "parallel")]
pub mod batch;
/// Adapter error types.
pub mod error;
/// Firestore blog post mapping.
pub mod post;
/// Sanity portable text normalization.
pub mod sanity;

#[cfg(feature = "parallel")]
pub use batch::{BatchInput, BatchOptions, BatchOutput, BatchResult, BatchStats, map_batch};
pub use error::CmsError;
pub use post::{
    Author, BlogPost, FirestoreDocument, PostMapper, ai_hint, find_by_slug, list_posts,
    publish_date, sort_newest_first,
};
pub use sanity::{AssetResolver, SanityAssets, normalize_portable_text};
