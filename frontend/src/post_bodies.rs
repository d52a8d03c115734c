use web_sys::{Document, Element};

use crate::config::BodiesConfig;
use crate::dom;
use crate::error::Result;
use crate::markdown::MarkdownRenderer;

pub const RENDERED_ATTRIBUTE: &str = "data-rendered";

/// Replaces the raw markdown of every post body on the page with its HTML.
/// Bodies already rendered are left alone. Returns how many were rendered.
pub fn render_all(document: &Document, config: &BodiesConfig) -> Result<usize> {
    let renderer = MarkdownRenderer::new();
    let mut rendered = 0;

    for body in dom::query_all(document, &config.selector)? {
        if render_body(&renderer, &body)? {
            rendered += 1;
        }
    }

    log::debug!("rendered {} post bodies", rendered);
    Ok(rendered)
}

fn render_body(renderer: &MarkdownRenderer, body: &Element) -> Result<bool> {
    if body.has_attribute(RENDERED_ATTRIBUTE) {
        return Ok(false);
    }

    let text = body.text_content().unwrap_or_default();
    body.set_inner_html(&renderer.render(&text));
    body.set_attribute(RENDERED_ATTRIBUTE, "true")?;
    Ok(true)
}
