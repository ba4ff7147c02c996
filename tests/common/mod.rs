//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use learnview::model::Entry;
use learnview::sources::StaticSource;
use learnview::{Document, DocumentLoader, DocumentSource, SourceError};

/// What a scripted file does when loaded.
pub enum Script {
    Load(Document),
    Fail,
    /// Wait for the notify before returning the document.
    Gated(Document, Arc<Notify>),
}

/// In-memory source with per-file behavior.
pub struct ScriptedSource {
    order: Vec<String>,
    files: HashMap<String, Script>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            files: HashMap::new(),
        }
    }

    pub fn with(mut self, name: &str, script: Script) -> Self {
        self.order.push(name.to_string());
        self.files.insert(name.to_string(), script);
        self
    }

    pub fn into_loader(self) -> DocumentLoader {
        DocumentLoader::new(Arc::new(self), Duration::from_secs(5))
    }
}

#[async_trait]
impl DocumentSource for ScriptedSource {
    fn describe(&self) -> String {
        "scripted".to_string()
    }

    async fn list_candidates(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.order.clone())
    }

    async fn load(&self, file: &str) -> Result<Document, SourceError> {
        match self.files.get(file) {
            Some(Script::Load(doc)) => Ok(doc.clone()),
            Some(Script::Gated(doc, gate)) => {
                gate.notified().await;
                Ok(doc.clone())
            }
            Some(Script::Fail) | None => Err(SourceError::NotFound(file.to_string())),
        }
    }
}

/// Document whose `tech_choices` section mentions the default filter text.
pub fn matching_doc(name: &str) -> Document {
    Document::new(
        name,
        vec![
            Entry::new("architecture", Some("Layered services")),
            Entry::new(
                "tech_choices",
                Some("Standardised on Testing Frameworks for every crate"),
            ),
        ],
    )
}

/// Document without any filter match.
pub fn plain_doc(name: &str) -> Document {
    Document::new(
        name,
        vec![
            Entry::new("patterns", Some("Builder everywhere")),
            Entry::new("tech_choices", Some("Picked a web framework")),
        ],
    )
}

pub fn sample_names() -> Vec<String> {
    StaticSource::builtin().names()
}
