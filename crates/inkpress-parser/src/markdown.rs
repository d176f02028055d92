//! Markdown rendering using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};

/// Markdown renderer with the common extended feature set enabled.
///
/// Raw HTML in the source is passed through unchanged.
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
    /// Create a renderer with tables, footnotes, strikethrough, task lists,
    /// heading attributes and definition lists enabled.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options.insert(Options::ENABLE_DEFINITION_LIST);

        Self { options }
    }

    /// Render a markdown body to HTML.
    pub fn render(&self, body: &str) -> String {
        let parser = Parser::new_ext(body, self.options);
        let mut output = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}
