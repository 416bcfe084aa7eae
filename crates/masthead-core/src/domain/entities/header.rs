//! Caller-supplied header configuration.

use std::collections::BTreeMap;

use crate::domain::value_objects::{TemplateData, TemplateValue};

/// The transform's configuration: the header template and the data made
/// visible to it.
///
/// Created once, before processing starts, immutable thereafter. Each
/// constructed transform instance owns its own copy, so independent
/// instances share nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderConfig {
    header_text: String,
    data: TemplateData,
}

impl HeaderConfig {
    /// A templated header with no caller data (the default mode).
    pub fn new(header_text: impl Into<String>) -> Self {
        Self {
            header_text: header_text.into(),
            data: TemplateData::default(),
        }
    }

    /// A literal header: `header_text` is prepended verbatim, never rendered.
    pub fn literal(header_text: impl Into<String>) -> Self {
        Self {
            header_text: header_text.into(),
            data: TemplateData::Disabled,
        }
    }

    /// Add a data field visible to the template.
    ///
    /// Adding a field re-enables rendering on a literal config.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        match &mut self.data {
            TemplateData::Fields(fields) => {
                fields.insert(key.into(), value.into());
            }
            TemplateData::Disabled => {
                let mut fields = BTreeMap::new();
                fields.insert(key.into(), value.into());
                self.data = TemplateData::Fields(fields);
            }
        }
        self
    }

    pub fn with_data(mut self, data: TemplateData) -> Self {
        self.data = data;
        self
    }

    pub fn header_text(&self) -> &str {
        &self.header_text
    }

    pub fn data(&self) -> &TemplateData {
        &self.data
    }

    /// Whether the header text is used verbatim, skipping rendering.
    pub fn is_literal(&self) -> bool {
        matches!(self.data, TemplateData::Disabled)
    }
}
