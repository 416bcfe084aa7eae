//! Header template rendering with auto-detected delimiters.
//!
//! Two independent, order-tried strategies sit behind the single
//! `TemplateRenderer` port: ERB-style `<%= expr %>` and `${expr}`. The
//! template itself decides which family applies; nothing is configured.
//! Which strategy matched is surfaced only through tracing.

mod strategy;

use masthead_core::{
    application::ports::TemplateRenderer, domain::TemplateContext, error::MastheadResult,
};
use tracing::debug;

use strategy::{DOLLAR, ERB};

/// Template renderer that auto-detects the placeholder syntax per template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelimiterRenderer;

impl DelimiterRenderer {
    /// Create a new delimiter renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for DelimiterRenderer {
    fn render(&self, template: &str, context: &TemplateContext) -> MastheadResult<String> {
        for strategy in [&ERB, &DOLLAR] {
            if strategy.detects(template) {
                debug!(syntax = strategy.name, "placeholder syntax detected");
                return strategy.render(template, context);
            }
        }
        // No placeholders in either syntax: the template is its own output.
        Ok(template.to_string())
    }
}
