use std::collections::{HashMap, HashSet};

use ammonia::Builder;
use pulldown_cmark::{Options, Parser, html};

/// Converts stored Markdown to sanitized HTML at read time.
///
/// The sanitizer is allow-list based: basic text formatting, block elements,
/// and links survive; every other tag and attribute (notably `<script>`) is
/// stripped. Rendering is deterministic and side-effect-free. One instance
/// is built at process start and shared through `AppState`; the underlying
/// parser and sanitizer types are `Sync`.
pub struct MarkdownRenderer {
    sanitizer: Builder<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let tags: HashSet<&str> = [
            "a", "b", "blockquote", "br", "code", "em", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
            "i", "li", "ol", "p", "pre", "s", "strong", "sub", "sup", "u", "ul",
        ]
        .into_iter()
        .collect();

        let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
        tag_attributes.insert("a", ["href", "title"].into_iter().collect());

        let mut sanitizer = Builder::default();
        sanitizer
            .tags(tags)
            .tag_attributes(tag_attributes)
            .url_schemes(["http", "https", "mailto"].into_iter().collect())
            .link_rel(Some("noopener noreferrer"));

        Self { sanitizer }
    }

    /// Render Markdown to sanitized HTML. Empty input yields an empty string.
    pub fn render(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }

        let parser = Parser::new_ext(markdown, Options::empty());
        let mut raw_html = String::new();
        html::push_html(&mut raw_html, parser);

        self.sanitizer.clean(&raw_html).to_string()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
