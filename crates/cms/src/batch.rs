//! Parallel mapping of many documents.

use crate::CmsError;
use crate::post::{BlogPost, FirestoreDocument, PostMapper, sort_newest_first};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// One document to map.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document id, copied onto the result.
    pub id: String,
    /// Raw document JSON (the `data` field map).
    pub source: String,
}

/// Outcome for one input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Id of the input.
    pub id: String,
    /// The mapped post (present on success).
    pub post: Option<BlogPost>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Counters for a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of inputs.
    pub total: usize,
    /// Inputs mapped successfully.
    pub succeeded: usize,
    /// Inputs that failed.
    pub failed: usize,
    /// Wall time in milliseconds.
    pub processing_time_ms: f64,
}

/// Batch settings.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Worker thread cap. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Stop at the first failure. Stopping forces sequential processing.
    pub stop_on_error: bool,
}

/// Results in input order plus stats.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    /// One entry per processed input.
    pub results: Vec<BatchResult>,
    /// Run statistics.
    pub stats: BatchStats,
}

impl BatchOutput {
    /// The successful posts, newest first.
    pub fn posts(&self) -> Vec<BlogPost> {
        let mut posts: Vec<BlogPost> = self
            .results
            .iter()
            .filter_map(|r| r.post.clone())
            .collect();
        sort_newest_first(&mut posts);
        posts
    }
}

/// Maps `inputs` with `mapper`, in parallel unless `stop_on_error` is set.
pub fn map_batch(
    inputs: Vec<BatchInput>,
    mapper: &PostMapper,
    options: &BatchOptions,
) -> BatchOutput {
    let start = Instant::now();

    let pool = options.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| log::warn!("falling back to the global thread pool: {}", err))
            .ok()
    });

    let total = inputs.len();
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let mapped = serde_json::from_str::<serde_json::Value>(&input.source)
            .map_err(CmsError::from)
            .and_then(|data| mapper.map(&FirestoreDocument::new(input.id.clone(), data)));
        match mapped {
            Ok(post) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    post: Some(post),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::debug!("batch input `{}` failed: {}", input.id, err);
                BatchResult {
                    id: input.id,
                    post: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if options.stop_on_error {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let stop = result.error.is_some();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    } else if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    let elapsed = start.elapsed();
    BatchOutput {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    }
}
