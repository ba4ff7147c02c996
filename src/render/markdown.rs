//! Markdown to HTML conversion for entry summaries.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Opens a highlighted span. Private-use codepoint, never produced by markdown.
pub(crate) const MARK_OPEN: char = '\u{E000}';
/// Closes a highlighted span.
pub(crate) const MARK_CLOSE: char = '\u{E001}';

/// Renders markdown to HTML with raw HTML escaped and highlight markers expanded.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }

    /// Convert markdown to an HTML fragment.
    ///
    /// Embedded HTML is shown as text. Marker characters are turned into
    /// `<mark>` tags after conversion so markdown never sees them as markup.
    /// Markers that would end up inside an attribute (image alt text, link
    /// titles and destinations, code block info) are dropped first.
    pub fn to_html(&self, markdown: &str) -> String {
        let mut image_depth = 0usize;
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) if image_depth > 0 => {
                Event::Text(scrub(raw))
            }
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Text(text) if image_depth > 0 => Event::Text(scrub(text)),
            Event::Code(code) if image_depth > 0 => Event::Code(scrub(code)),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                image_depth += 1;
                Event::Start(Tag::Image {
                    link_type,
                    dest_url: scrub(dest_url),
                    title: scrub(title),
                    id,
                })
            }
            Event::End(TagEnd::Image) => {
                image_depth = image_depth.saturating_sub(1);
                Event::End(TagEnd::Image)
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: scrub(dest_url),
                title: scrub(title),
                id,
            }),
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(scrub(info))))
            }
            other => other,
        });

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);

        if out.contains(MARK_OPEN) {
            out = out
                .replace(MARK_OPEN, "<mark>")
                .replace(MARK_CLOSE, "</mark>");
        }
        out
    }
}

fn scrub(text: CowStr<'_>) -> CowStr<'_> {
    if text.contains(|c: char| c == MARK_OPEN || c == MARK_CLOSE) {
        CowStr::from(strip_markers(&text))
    } else {
        text
    }
}

/// Remove marker characters from untrusted text.
pub(crate) fn strip_markers(text: &str) -> String {
    text.chars()
        .filter(|&c| c != MARK_OPEN && c != MARK_CLOSE)
        .collect()
}

/// Wrap every occurrence of `needle` in marker characters.
pub(crate) fn mark_occurrences(text: &str, needle: &str) -> String {
    if needle.is_empty() {
        return text.to_string();
    }
    text.replace(needle, &format!("{MARK_OPEN}{needle}{MARK_CLOSE}"))
}
