//! Markdown to HTML for post bodies.

use comrak::Options;

/// Renders post markdown. Raw HTML in a post is never passed through; posts
/// are user input.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new() -> Self {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.table = true;

        options.render.unsafe_ = false;
        options.render.escape = true;

        MarkdownRenderer { options }
    }

    pub fn render(&self, content: &str) -> String {
        comrak::markdown_to_html(content, &self.options)
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_html(content: &str) -> String {
    MarkdownRenderer::new().render(content)
}
