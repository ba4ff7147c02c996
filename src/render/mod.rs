//! Category index and HTML rendering for a loaded document.
//!
//! Everything here is a pure function of the document and the filter, so
//! rendering the same category twice yields identical output.

mod markdown;

pub use markdown::MarkdownRenderer;

use std::collections::BTreeSet;

use crate::model::{Document, Entry, FilterConfig, LEARNINGS_SUFFIX};

/// Shown when a document has no category to display.
pub const EMPTY_DOCUMENT_MESSAGE: &str = "No content found in the selected file";

/// Shown for an entry without a summary.
pub const MISSING_SUMMARY: &str = "No summary available";

/// Sorted, duplicate-free category labels of a document.
pub fn categories(doc: &Document) -> Vec<String> {
    doc.entries
        .iter()
        .map(|e| e.kind.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Human-readable category title: `tech_choices` becomes `Tech Choices`.
pub fn category_title(kind: &str) -> String {
    kind.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Short name for a data file: `acme_learnings.json` becomes `acme` when
/// `suffix` is `_learnings.json`.
pub fn document_label<'a>(file: &'a str, suffix: &str) -> &'a str {
    file.strip_suffix(suffix)
        .filter(|label| !label.is_empty())
        .or_else(|| file.strip_suffix(".json"))
        .unwrap_or(file)
}

/// Escape text for inclusion in HTML.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Category to show first after loading: the filter's target if it has a
/// match, otherwise the first entry's category.
pub fn default_category(doc: &Document, filter: &FilterConfig) -> Option<String> {
    if filter.document_matches(doc) {
        Some(filter.type_filter.clone())
    } else {
        doc.first_category().map(str::to_string)
    }
}

/// Renders categories of a document as HTML fragments.
#[derive(Debug, Clone)]
pub struct CategoryRenderer {
    markdown: MarkdownRenderer,
    suffix: String,
}

impl Default for CategoryRenderer {
    fn default() -> Self {
        Self {
            markdown: MarkdownRenderer::new(),
            suffix: LEARNINGS_SUFFIX.to_string(),
        }
    }
}

impl CategoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// File suffix stripped from document names in headings.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Render every entry of `kind`, or an explicit empty-state message.
    pub fn render(&self, doc: &Document, kind: &str, filter: &FilterConfig) -> String {
        let items: Vec<&Entry> = doc.entries_of(kind).collect();
        if items.is_empty() {
            return format!(
                r#"<p class="empty-state">No content found for type: {}</p>"#,
                html_escape(kind)
            );
        }

        let highlight = filter.highlights(kind);
        let mut out = format!(
            "<h2>{} - {}</h2>\n",
            html_escape(document_label(&doc.name, &self.suffix)),
            html_escape(&category_title(kind))
        );

        if kind == filter.type_filter && items.iter().any(|e| filter.summary_matches(e)) {
            out.push_str(&format!(
                "<p class=\"filter-note\"><em>This section contains '{}'</em></p>\n",
                html_escape(&filter.content_filter)
            ));
        }

        for entry in items {
            out.push_str(&self.render_entry(entry, highlight.then_some(filter.content_filter.as_str())));
        }
        out
    }

    /// Placeholder for a document with nothing to show.
    pub fn render_empty_document(&self) -> String {
        format!(r#"<p class="empty-state">{}</p>"#, EMPTY_DOCUMENT_MESSAGE)
    }

    fn render_entry(&self, entry: &Entry, highlight: Option<&str>) -> String {
        let summary = markdown::strip_markers(entry.summary.as_deref().unwrap_or(MISSING_SUMMARY));
        let summary = match highlight {
            Some(needle) => markdown::mark_occurrences(&summary, needle),
            None => summary,
        };

        let mut out = String::from("<article class=\"entry\">\n");
        out.push_str(&self.markdown.to_html(&summary));
        if let Some(data) = &entry.data {
            let pretty = serde_json::to_string_pretty(data).unwrap_or_default();
            out.push_str(&format!(
                "<details class=\"entry-data\"><summary>data</summary><pre>{}</pre></details>\n",
                html_escape(&pretty)
            ));
        }
        out.push_str("</article>\n");
        out
    }
}
