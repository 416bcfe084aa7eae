//! Delimiter strategies: scan, resolve, substitute.

use masthead_core::{
    application::ApplicationError, domain::TemplateContext, error::MastheadResult,
};

/// One placeholder syntax: an opening delimiter and its closer.
pub(crate) struct Strategy {
    pub(crate) name: &'static str,
    open: &'static str,
    close: &'static str,
}

pub(crate) static ERB: Strategy = Strategy {
    name: "erb",
    open: "<%=",
    close: "%>",
};

pub(crate) static DOLLAR: Strategy = Strategy {
    name: "dollar",
    open: "${",
    close: "}",
};

impl Strategy {
    /// Whether this syntax appears in the template at all.
    pub(crate) fn detects(&self, template: &str) -> bool {
        template.contains(self.open)
    }

    /// Substitute every placeholder, resolving references in `context`.
    ///
    /// References may be dotted (`file.relative`); surrounding whitespace
    /// inside the delimiters is ignored.
    pub(crate) fn render(
        &self,
        template: &str,
        context: &TemplateContext,
    ) -> MastheadResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find(self.open) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + self.open.len()..];
            let end =
                after_open
                    .find(self.close)
                    .ok_or_else(|| ApplicationError::MalformedTemplate {
                        detail: format!("unterminated `{}` placeholder", self.open),
                    })?;
            let reference = after_open[..end].trim();
            let value =
                context
                    .resolve(reference)
                    .ok_or_else(|| ApplicationError::UnresolvedReference {
                        key: reference.to_string(),
                    })?;
            let rendered = value
                .render()
                .ok_or_else(|| ApplicationError::UnrenderableValue {
                    key: reference.to_string(),
                })?;
            out.push_str(&rendered);
            rest = &after_open[end + self.close.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
