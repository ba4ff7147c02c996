//! Finding which data files to offer for selection.
//!
//! Every candidate is loaded in full and checked against the filter.
//! Files that fail to load are skipped; if nothing loads at all the
//! caller falls back to the built-in samples.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::DiscoveryError;
use crate::model::FilterConfig;
use crate::sources::{DocumentLoader, StaticSource};

/// Where the displayed file list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryOrigin {
    /// The configured data location.
    Source,
    /// Built-in sample data, used because the data location yielded nothing.
    Samples,
}

/// A candidate that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCandidate {
    pub file: String,
    pub error: String,
}

/// Outcome of a discovery run. All lists keep discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub candidates: Vec<String>,
    pub loaded: Vec<String>,
    pub matched: Vec<String>,
    pub failed: Vec<FailedCandidate>,
    pub origin: DiscoveryOrigin,
}

impl DiscoveryReport {
    /// Report listing every sample file.
    pub fn from_samples(samples: &StaticSource) -> Self {
        let names = samples.names();
        Self {
            candidates: names.clone(),
            loaded: names,
            matched: Vec::new(),
            failed: Vec::new(),
            origin: DiscoveryOrigin::Samples,
        }
    }

    /// Files to offer: the matching ones if any, otherwise everything that loaded.
    pub fn display_files(&self) -> &[String] {
        if self.matched.is_empty() {
            &self.loaded
        } else {
            &self.matched
        }
    }

    /// One-line description of the outcome for the status area.
    pub fn status_message(&self, filter: &FilterConfig) -> String {
        match self.origin {
            DiscoveryOrigin::Samples => {
                "Could not load any data files. Showing built-in sample data.".to_string()
            }
            DiscoveryOrigin::Source if !self.matched.is_empty() => format!(
                "Showing {} files containing '{}' in '{}' sections",
                self.matched.len(),
                filter.content_filter,
                filter.type_filter
            ),
            DiscoveryOrigin::Source => format!(
                "No files found containing '{}' in '{}' sections. Showing all files.",
                filter.content_filter, filter.type_filter
            ),
        }
    }
}

/// Load every candidate and split the results into loaded and matching files.
pub async fn discover(
    loader: &DocumentLoader,
    filter: &FilterConfig,
    concurrency: usize,
) -> Result<DiscoveryReport, DiscoveryError> {
    let candidates = loader
        .list_candidates()
        .await
        .map_err(DiscoveryError::Listing)?;
    if candidates.is_empty() {
        return Err(DiscoveryError::NoCandidates);
    }

    // buffered() yields results in input order regardless of completion order
    let results: Vec<_> = stream::iter(candidates.iter().cloned())
        .map(|file| async move {
            let result = loader.load(&file).await;
            (file, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut loaded = Vec::new();
    let mut matched = Vec::new();
    let mut failed = Vec::new();
    for (file, result) in results {
        match result {
            Ok(doc) => {
                if filter.document_matches(&doc) {
                    matched.push(file.clone());
                }
                loaded.push(file.clone());
            }
            Err(e) => {
                warn!("Skipping {}: {}", file, e);
                failed.push(FailedCandidate {
                    file: file.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if loaded.is_empty() {
        return Err(DiscoveryError::AllFailed {
            attempted: candidates.len(),
        });
    }

    info!(
        "Discovered {} files ({} matching, {} failed) from {}",
        loaded.len(),
        matched.len(),
        failed.len(),
        loader.describe()
    );

    Ok(DiscoveryReport {
        candidates,
        loaded,
        matched,
        failed,
        origin: DiscoveryOrigin::Source,
    })
}

/// Run discovery, falling back to the loader's samples when it fails.
pub async fn discover_or_fallback(
    loader: &DocumentLoader,
    filter: &FilterConfig,
    concurrency: usize,
) -> DiscoveryReport {
    match discover(loader, filter, concurrency).await {
        Ok(report) => report,
        Err(e) => {
            warn!("Discovery failed ({}), using built-in samples", e);
            DiscoveryReport::from_samples(loader.samples())
        }
    }
}
