//! Where learnings documents come from.
//!
//! Every source answers the same two questions: which files exist, and
//! what a given file contains. [`DocumentLoader`] puts the built-in
//! samples in front of the configured source and bounds every load with
//! a timeout, so the rest of the pipeline never cares where a document
//! came from.

mod http_client;
mod local;
mod remote;
mod samples;

pub use http_client::{is_json_content_type, resolve_user_agent, HttpClient};
pub use local::LocalSource;
pub use remote::RemoteSource;
pub use samples::StaticSource;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::SourceError;
use crate::model::Document;

/// A provider of learnings documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short description for logs and status messages.
    fn describe(&self) -> String;

    /// Candidate file identifiers, in discovery order.
    async fn list_candidates(&self) -> Result<Vec<String>, SourceError>;

    /// Load and validate one document.
    async fn load(&self, file: &str) -> Result<Document, SourceError>;
}

/// Pick a source for a data location: URLs are fetched remotely, anything else is a directory.
pub fn source_for(settings: &Settings) -> Result<Arc<dyn DocumentSource>, SourceError> {
    let location = settings.data_location.as_str();
    if location.starts_with("http://") || location.starts_with("https://") {
        let client = HttpClient::with_user_agent(settings.load_timeout(), settings.user_agent.as_deref())
            .map_err(|source| SourceError::Http {
                url: location.to_string(),
                source,
            })?;
        let source = RemoteSource::new(location, client)?
            .with_manifest(&settings.manifest_name)
            .with_suffix(&settings.file_suffix)
            .with_fallback_candidates(settings.candidates.clone());
        Ok(Arc::new(source))
    } else {
        let source = LocalSource::new(location)
            .with_manifest(&settings.manifest_name)
            .with_suffix(&settings.file_suffix)
            .with_fallback_candidates(settings.candidates.clone());
        Ok(Arc::new(source))
    }
}

/// Parse a manifest body: a JSON array of file names.
///
/// Non-string elements and names without the expected suffix are dropped.
pub fn parse_manifest(name: &str, bytes: &[u8], suffix: &str) -> Result<Vec<String>, SourceError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| SourceError::Malformed {
        file: name.to_string(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(SourceError::NotAnArray {
            file: name.to_string(),
        });
    };

    let files: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .filter(|f| f.ends_with(suffix))
        .map(str::to_string)
        .collect();

    if files.len() < items.len() {
        debug!(
            "{}: ignored {} manifest entries",
            name,
            items.len() - files.len()
        );
    }
    Ok(files)
}

/// Loads documents from the built-in samples or the configured source.
#[derive(Clone)]
pub struct DocumentLoader {
    primary: Arc<dyn DocumentSource>,
    samples: Arc<StaticSource>,
    timeout: Duration,
}

impl DocumentLoader {
    pub fn new(primary: Arc<dyn DocumentSource>, timeout: Duration) -> Self {
        Self {
            primary,
            samples: Arc::new(StaticSource::builtin()),
            timeout,
        }
    }

    /// Replace the fallback sample set.
    pub fn with_samples(mut self, samples: StaticSource) -> Self {
        self.samples = Arc::new(samples);
        self
    }

    pub fn samples(&self) -> &StaticSource {
        &self.samples
    }

    pub fn describe(&self) -> String {
        self.primary.describe()
    }

    /// Candidate files from the primary source, bounded by the load timeout.
    pub async fn list_candidates(&self) -> Result<Vec<String>, SourceError> {
        match tokio::time::timeout(self.timeout, self.primary.list_candidates()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                file: self.primary.describe(),
                secs: self.timeout.as_secs(),
            }),
        }
    }

    /// Load a document, serving samples from memory.
    pub async fn load(&self, file: &str) -> Result<Document, SourceError> {
        if let Some(doc) = self.samples.get(file) {
            debug!("Serving {} from built-in samples", file);
            return Ok(doc.clone());
        }

        match tokio::time::timeout(self.timeout, self.primary.load(file)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Loading {} timed out after {:?}", file, self.timeout);
                Err(SourceError::Timeout {
                    file: file.to_string(),
                    secs: self.timeout.as_secs(),
                })
            }
        }
    }
}
