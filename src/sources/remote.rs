//! Documents served over HTTP from a base URL.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use super::{parse_manifest, DocumentSource, HttpClient};
use crate::error::SourceError;
use crate::model::{Document, LEARNINGS_SUFFIX};

/// Fetches a manifest and documents relative to a base URL.
pub struct RemoteSource {
    base: Url,
    client: HttpClient,
    manifest: String,
    suffix: String,
    fallback_candidates: Vec<String>,
}

impl RemoteSource {
    pub fn new(base: &str, client: HttpClient) -> Result<Self, SourceError> {
        // Url::join replaces the last path segment unless the base ends with '/'
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|source| SourceError::BaseUrl {
            base: base.to_string(),
            source,
        })?;

        Ok(Self {
            base,
            client,
            manifest: "manifest.json".to_string(),
            suffix: LEARNINGS_SUFFIX.to_string(),
            fallback_candidates: Vec::new(),
        })
    }

    pub fn with_manifest(mut self, manifest: &str) -> Self {
        self.manifest = manifest.to_string();
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Candidates used when the manifest is unavailable.
    pub fn with_fallback_candidates(mut self, candidates: Vec<String>) -> Self {
        self.fallback_candidates = candidates;
        self
    }

    /// Absolute URL for a file name under the base.
    pub fn url_for(&self, file: &str) -> Result<Url, SourceError> {
        if file.is_empty() || file == "." || file == ".." {
            return Err(SourceError::InvalidName(file.to_string()));
        }
        self.base
            .join(&urlencoding::encode(file))
            .map_err(|source| SourceError::BaseUrl {
                base: self.base.to_string(),
                source,
            })
    }
}

#[async_trait]
impl DocumentSource for RemoteSource {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn list_candidates(&self) -> Result<Vec<String>, SourceError> {
        let url = self.url_for(&self.manifest)?;
        let manifest = match self.client.get_json_bytes(url.as_str()).await {
            Ok(bytes) => parse_manifest(&self.manifest, &bytes, &self.suffix),
            Err(e) => Err(e),
        };

        match manifest {
            Ok(files) => {
                debug!("Manifest {} lists {} files", url, files.len());
                Ok(files)
            }
            Err(e) if !self.fallback_candidates.is_empty() => {
                warn!("Manifest unavailable ({}), using configured file list", e);
                Ok(self.fallback_candidates.clone())
            }
            Err(e) => Err(e),
        }
    }

    async fn load(&self, file: &str) -> Result<Document, SourceError> {
        let url = self.url_for(file)?;
        let bytes = self.client.get_json_bytes(url.as_str()).await?;
        Document::from_slice(file, &bytes)
    }
}
