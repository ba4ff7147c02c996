//! Built-in sample documents, shown when no real data can be loaded.

use async_trait::async_trait;
use serde_json::json;

use super::DocumentSource;
use crate::error::SourceError;
use crate::model::{Document, Entry};

/// In-memory documents keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: Vec<Document>,
}

impl StaticSource {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// The sample set shipped with the binary. Never empty.
    pub fn builtin() -> Self {
        Self::new(vec![
            Document::new(
                "example_learnings.json",
                vec![
                    Entry::new(
                        "tech_choices",
                        Some(
                            "Adopted **Testing Frameworks** early: unit tests live next to the \
                             code and integration tests run against a throwaway server.",
                        ),
                    ),
                    Entry::new(
                        "tech_choices",
                        Some("Chose a single async runtime for all network I/O."),
                    ),
                    Entry::new(
                        "architecture",
                        Some(
                            "Core logic talks to the UI through small *port* traits, so the \
                             same code drives the CLI and the web page.",
                        ),
                    ),
                    Entry::new(
                        "lessons_learned",
                        Some("Validate input once at the boundary, then trust the types."),
                    )
                    .with_data(json!({"confidence": "high"})),
                ],
            ),
            Document::new(
                "sample_project_learnings.json",
                vec![
                    Entry::new(
                        "architecture",
                        Some("A manifest file lists every data file so clients can discover them."),
                    ),
                    Entry::new(
                        "patterns",
                        Some(
                            "- Fallback data keeps the page useful offline\n\
                             - Every remote load has a timeout",
                        ),
                    ),
                    Entry::new(
                        "tech_choices",
                        Some("Markdown for summaries, rendered to HTML at display time."),
                    ),
                ],
            ),
        ])
    }

    pub fn get(&self, file: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == file)
    }

    pub fn names(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn describe(&self) -> String {
        "built-in samples".to_string()
    }

    async fn list_candidates(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.names())
    }

    async fn load(&self, file: &str) -> Result<Document, SourceError> {
        self.get(file)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(file.to_string()))
    }
}
