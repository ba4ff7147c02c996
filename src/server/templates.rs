//! HTML templates for the web interface.

use crate::model::FilterConfig;
use crate::render::html_escape;
use crate::ui::{PanelSnapshot, StatusLevel};

/// Base HTML page.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
    <main>
        <h1>{}</h1>
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        CSS,
        html_escape(title),
        content
    )
}

/// Render the viewer page from the panel state.
pub fn viewer_page(snapshot: &PanelSnapshot, filter: &FilterConfig) -> String {
    let status = match &snapshot.status {
        Some(status) => {
            let class = match status.level {
                StatusLevel::Info => "status",
                StatusLevel::Error => "status error",
            };
            format!(
                r#"<div id="filter-indicator" class="{}">{}</div>"#,
                class,
                html_escape(&status.message)
            )
        }
        None => String::new(),
    };

    let options: String = snapshot
        .files
        .iter()
        .map(|file| {
            let selected = if snapshot.selected_file.as_deref() == Some(file.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                html_escape(file),
                selected,
                html_escape(file)
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    let buttons: String = match snapshot.selected_file.as_deref() {
        Some(file) => snapshot
            .categories
            .iter()
            .map(|b| {
                let class = if b.active { "type-button active" } else { "type-button" };
                format!(
                    r#"<a class="{}" href="/?file={}&amp;category={}">{}</a>"#,
                    class,
                    urlencoding::encode(file),
                    urlencoding::encode(&b.kind),
                    html_escape(&b.label)
                )
            })
            .collect::<Vec<_>>()
            .join("\n            "),
        None => String::new(),
    };

    let content = if snapshot.content.is_empty() {
        "<p>Please select a file to view content</p>".to_string()
    } else {
        snapshot.content.clone()
    };

    let body = format!(
        r#"
    {}
    <form method="get" action="/" id="file-form">
        <label for="file-dropdown">Select file:</label>
        <select id="file-dropdown" name="file" onchange="this.form.submit()">
                {}
        </select>
        <noscript><button type="submit">show</button></noscript>
    </form>
    <div>
        <label>Select content type:</label>
        <nav id="type-buttons">
            {}
        </nav>
    </div>
    <section id="content-output" data-filter="{}">
        {}
    </section>
    "#,
        status,
        options,
        buttons,
        html_escape(&filter.content_filter),
        content
    );

    base_template("Learning Content Viewer", &body)
}

/// CSS styles for the web interface - minimal text-based design.
pub const CSS: &str = r#"
:root {
    --bg: #fff;
    --text: #222;
    --text-muted: #666;
    --link: #0066cc;
    --border: #ccc;
    --mark: #fff3a3;
}
body { background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 1rem; }
.status { color: var(--text-muted); margin-bottom: 1rem; }
.status.error { color: #b00020; }
#file-form { margin-bottom: 1.5rem; }
#type-buttons { display: flex; flex-wrap: wrap; gap: .5rem; margin: .5rem 0 1.5rem; }
.type-button { border: 1px solid var(--link); border-radius: 4px; color: var(--link); padding: .25rem .75rem; text-decoration: none; }
.type-button.active { background: var(--link); color: var(--bg); }
#content-output { border: 1px solid var(--border); border-radius: 4px; padding: 1rem; }
.entry { border-bottom: 1px solid var(--border); padding: .5rem 0; }
.entry:last-child { border-bottom: none; }
.empty-state { color: var(--text-muted); }
mark { background: var(--mark); font-weight: bold; }
"#;
