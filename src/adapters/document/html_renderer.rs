//! Markdown to printable HTML.
//!
//! Uses pulldown-cmark with raw HTML passthrough, no autolinking and soft
//! breaks kept as newlines, then wraps the fragment in a print-oriented page
//! shell (A4, fixed margins, non-wrapping code blocks).

use pulldown_cmark::{html, Options, Parser};

/// Parser options for dossier rendering.
///
/// pulldown-cmark never autolinks bare URLs and never turns soft breaks into
/// `<br>`, and raw HTML is passed through as-is.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render a markdown string to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, parser);
    body
}

/// Render markdown into a complete print-styled HTML document.
pub fn render_document(markdown: &str, title: &str) -> String {
    wrap_html(&markdown_to_html(markdown), title)
}

/// Wrap an HTML fragment in the page shell. `title` is escaped.
pub fn wrap_html(body: &str, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <main class="dossier">
{body}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        css = PRINT_CSS,
        body = body
    )
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Print stylesheet; the browser is asked to honour its `@page` size.
const PRINT_CSS: &str = r#"
@page {
    size: A4;
    margin: 18mm 14mm 18mm 14mm;
}

* {
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
    font-size: 11pt;
    line-height: 1.5;
    color: #1f2937;
    margin: 0;
}

h1, h2, h3, h4 {
    line-height: 1.25;
    margin: 1.4em 0 0.5em;
    page-break-after: avoid;
}

h1 {
    font-size: 20pt;
    border-bottom: 2px solid #2563eb;
    padding-bottom: 4pt;
}

h2 {
    font-size: 15pt;
    border-bottom: 1px solid #e5e7eb;
    padding-bottom: 2pt;
}

h3 {
    font-size: 12.5pt;
}

blockquote {
    margin: 1em 0;
    padding: 0.4em 1em;
    border-left: 4px solid #2563eb;
    background: #f3f4f6;
    color: #4b5563;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 0.8em 0;
    font-size: 9.5pt;
    page-break-inside: auto;
}

tr {
    page-break-inside: avoid;
}

th, td {
    border: 1px solid #d1d5db;
    padding: 4pt 6pt;
    text-align: left;
    vertical-align: top;
}

th {
    background: #f3f4f6;
    font-weight: 600;
}

code {
    font-family: 'JetBrains Mono', 'Fira Code', Consolas, monospace;
    font-size: 9pt;
    background: #f3f4f6;
    padding: 0 2pt;
    border-radius: 2pt;
}

pre {
    background: #f8fafc;
    border: 1px solid #e5e7eb;
    border-radius: 4pt;
    padding: 8pt;
    white-space: pre;
    overflow: hidden;
    font-size: 8.5pt;
    line-height: 1.35;
}

pre code {
    background: transparent;
    padding: 0;
    white-space: pre;
}

a {
    color: #2563eb;
    text-decoration: none;
}

ul.contains-task-list, li.task-list-item {
    list-style: none;
}

input[type="checkbox"] {
    margin-right: 0.5em;
}

hr {
    border: none;
    border-top: 1px solid #e5e7eb;
    margin: 1.5em 0;
}
"#;
