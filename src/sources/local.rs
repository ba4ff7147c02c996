//! Documents read from a directory on disk.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{parse_manifest, DocumentSource};
use crate::error::SourceError;
use crate::model::{Document, LEARNINGS_SUFFIX};

/// Reads `*_learnings.json` files (or a manifest) from a directory.
pub struct LocalSource {
    dir: PathBuf,
    manifest: String,
    suffix: String,
    fallback_candidates: Vec<String>,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            manifest: "manifest.json".to_string(),
            suffix: LEARNINGS_SUFFIX.to_string(),
            fallback_candidates: Vec::new(),
        }
    }

    pub fn with_manifest(mut self, manifest: &str) -> Self {
        self.manifest = manifest.to_string();
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Candidates used when the directory cannot be read.
    pub fn with_fallback_candidates(mut self, candidates: Vec<String>) -> Self {
        self.fallback_candidates = candidates;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a file name inside the directory, refusing anything that is not a plain name.
    fn path_for(&self, file: &str) -> Result<PathBuf, SourceError> {
        let mut components = Path::new(file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(file)),
            _ => Err(SourceError::InvalidName(file.to_string())),
        }
    }

    async fn scan_dir(&self) -> Result<Vec<String>, SourceError> {
        let io_err = |source: std::io::Error| SourceError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(io_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(&self.suffix) {
                files.push(name);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl DocumentSource for LocalSource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    async fn list_candidates(&self) -> Result<Vec<String>, SourceError> {
        let manifest_path = self.dir.join(&self.manifest);
        match tokio::fs::read(&manifest_path).await {
            Ok(bytes) => match parse_manifest(&self.manifest, &bytes, &self.suffix) {
                Ok(files) => {
                    debug!("Manifest {} lists {} files", manifest_path.display(), files.len());
                    return Ok(files);
                }
                Err(e) => warn!("{}, scanning {} instead", e, self.dir.display()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to read {}: {}", manifest_path.display(), e),
        }

        match self.scan_dir().await {
            Ok(files) => Ok(files),
            Err(e) if !self.fallback_candidates.is_empty() => {
                warn!("{}, using configured file list", e);
                Ok(self.fallback_candidates.clone())
            }
            Err(e) => Err(e),
        }
    }

    async fn load(&self, file: &str) -> Result<Document, SourceError> {
        let path = self.path_for(file)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Document::from_slice(file, &bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(file.to_string()))
            }
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }
}
