//! Learnings documents and the filter applied to them.
//!
//! Raw JSON is validated once, when a document is built, into typed
//! [`Entry`] values. Records that do not have the expected shape are kept
//! as [`Rejection`]s so callers can report them, but nothing downstream
//! ever sees them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;

/// File name suffix that marks a learnings document.
pub const LEARNINGS_SUFFIX: &str = "_learnings.json";

/// One validated record from a learnings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Category label (the JSON `type` field).
    #[serde(rename = "type")]
    pub kind: String,
    /// Markdown body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Opaque payload carried alongside the summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Entry {
    pub fn new(kind: impl Into<String>, summary: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            summary: summary.map(str::to_string),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Validate a raw JSON record.
    pub fn from_value(value: &Value) -> Result<Self, RejectReason> {
        let obj = value.as_object().ok_or(RejectReason::NotAnObject)?;
        let kind = match obj.get("type") {
            None | Some(Value::Null) => return Err(RejectReason::MissingType),
            Some(Value::String(s)) if s.is_empty() => return Err(RejectReason::EmptyType),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(RejectReason::TypeNotString),
        };
        // A non-string summary is treated the same as a missing one.
        let summary = obj.get("summary").and_then(Value::as_str).map(str::to_string);
        let data = obj.get("data").filter(|v| !v.is_null()).cloned();
        Ok(Self {
            kind,
            summary,
            data,
        })
    }
}

/// Why a raw record was not accepted as an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotAnObject,
    MissingType,
    TypeNotString,
    EmptyType,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NotAnObject => write!(f, "record is not an object"),
            RejectReason::MissingType => write!(f, "record has no type"),
            RejectReason::TypeNotString => write!(f, "type is not a string"),
            RejectReason::EmptyType => write!(f, "type is empty"),
        }
    }
}

/// A raw record that failed validation, by position in the source array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectReason,
}

/// Ordered entries loaded from a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub entries: Vec<Entry>,
    pub rejected: Vec<Rejection>,
}

impl Document {
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
            rejected: Vec::new(),
        }
    }

    /// Build a document from a parsed JSON body, which must be an array.
    pub fn from_value(name: &str, value: Value) -> Result<Self, SourceError> {
        let Value::Array(items) = value else {
            return Err(SourceError::NotAnArray {
                file: name.to_string(),
            });
        };

        let mut entries = Vec::with_capacity(items.len());
        let mut rejected = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match Entry::from_value(item) {
                Ok(entry) => entries.push(entry),
                Err(reason) => {
                    debug!("{}: skipping record {}: {}", name, index, reason);
                    rejected.push(Rejection { index, reason });
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            entries,
            rejected,
        })
    }

    /// Parse raw bytes as a learnings document.
    pub fn from_slice(name: &str, bytes: &[u8]) -> Result<Self, SourceError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|source| SourceError::Malformed {
            file: name.to_string(),
            source,
        })?;
        Self::from_value(name, value)
    }

    /// Entries of one category, in document order.
    pub fn entries_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Category of the first entry in document order.
    pub fn first_category(&self) -> Option<&str> {
        self.entries.first().map(|e| e.kind.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Content filter and target category, fixed for the life of a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Substring searched for in summaries (case-sensitive).
    pub content_filter: String,
    /// Category the filter applies to.
    pub type_filter: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            content_filter: "Testing Frameworks".to_string(),
            type_filter: "tech_choices".to_string(),
        }
    }
}

impl FilterConfig {
    pub fn new(content_filter: impl Into<String>, type_filter: impl Into<String>) -> Self {
        Self {
            content_filter: content_filter.into(),
            type_filter: type_filter.into(),
        }
    }

    /// True if the entry is in the target category and its summary contains the filter text.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.kind == self.type_filter && self.summary_matches(entry)
    }

    /// True if the entry's summary contains the filter text, regardless of category.
    pub fn summary_matches(&self, entry: &Entry) -> bool {
        entry
            .summary
            .as_deref()
            .is_some_and(|s| s.contains(self.content_filter.as_str()))
    }

    /// True if any entry in the document matches.
    pub fn document_matches(&self, doc: &Document) -> bool {
        doc.entries.iter().any(|e| self.matches(e))
    }

    /// Whether occurrences should be highlighted in the given category.
    pub fn highlights(&self, kind: &str) -> bool {
        kind == self.type_filter && !self.content_filter.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_from_value() {
        let entry = Entry::from_value(&json!({
            "type": "tech_choices",
            "summary": "Uses **tokio**",
            "data": {"crates": ["tokio"]}
        }))
        .unwrap();
        assert_eq!(entry.kind, "tech_choices");
        assert_eq!(entry.summary.as_deref(), Some("Uses **tokio**"));
        assert_eq!(entry.data, Some(json!({"crates": ["tokio"]})));
    }

    #[test]
    fn test_entry_rejections() {
        assert_eq!(Entry::from_value(&json!("text")), Err(RejectReason::NotAnObject));
        assert_eq!(Entry::from_value(&json!([1, 2])), Err(RejectReason::NotAnObject));
        assert_eq!(
            Entry::from_value(&json!({"summary": "x"})),
            Err(RejectReason::MissingType)
        );
        assert_eq!(
            Entry::from_value(&json!({"type": null})),
            Err(RejectReason::MissingType)
        );
        assert_eq!(
            Entry::from_value(&json!({"type": 3})),
            Err(RejectReason::TypeNotString)
        );
        assert_eq!(
            Entry::from_value(&json!({"type": ""})),
            Err(RejectReason::EmptyType)
        );
    }

    #[test]
    fn test_non_string_summary_is_absent() {
        let entry = Entry::from_value(&json!({"type": "a", "summary": 42})).unwrap();
        assert!(entry.summary.is_none());
    }

    #[test]
    fn test_document_keeps_order_and_rejections() {
        let doc = Document::from_value(
            "x_learnings.json",
            json!([
                {"type": "b"},
                7,
                {"type": "a", "summary": "hello"},
                {"summary": "orphan"}
            ]),
        )
        .unwrap();
        let kinds: Vec<_> = doc.entries.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["b", "a"]);
        assert_eq!(
            doc.rejected,
            vec![
                Rejection {
                    index: 1,
                    reason: RejectReason::NotAnObject
                },
                Rejection {
                    index: 3,
                    reason: RejectReason::MissingType
                },
            ]
        );
        assert_eq!(doc.first_category(), Some("b"));
    }

    #[test]
    fn test_document_must_be_array() {
        let err = Document::from_value("x.json", json!({"type": "a"})).unwrap_err();
        assert!(matches!(err, SourceError::NotAnArray { .. }));

        let err = Document::from_slice("x.json", b"{not json").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_filter_matches() {
        let filter = FilterConfig::default();
        let hit = Entry::new("tech_choices", Some("We use Testing Frameworks heavily"));
        let wrong_kind = Entry::new("patterns", Some("Testing Frameworks"));
        let wrong_case = Entry::new("tech_choices", Some("testing frameworks"));
        let no_summary = Entry::new("tech_choices", None);

        assert!(filter.matches(&hit));
        assert!(!filter.matches(&wrong_kind));
        assert!(!filter.matches(&wrong_case));
        assert!(!filter.matches(&no_summary));
        assert!(filter.summary_matches(&wrong_kind));
    }

    #[test]
    fn test_empty_filter_never_highlights() {
        let filter = FilterConfig::new("", "tech_choices");
        assert!(!filter.highlights("tech_choices"));
        assert!(FilterConfig::default().highlights("tech_choices"));
        assert!(!FilterConfig::default().highlights("patterns"));
    }
}
