//! Domain value objects: template data, values, and the per-file context.
//!
//! # Design
//!
//! These are pure value types - equality-by-value, no identity, no I/O.
//! `TemplateData` models the caller's two modes (fields vs the "no
//! templating" sentinel); `TemplateValue` is the closed set of things a
//! template may interpolate; `TemplateContext` is the ephemeral per-file
//! environment a header is rendered against.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::file::FileObject;

// ── TemplateData ─────────────────────────────────────────────────────────────

/// Caller-supplied template data, or the sentinel disabling rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateData {
    /// Treat the header text as literal: no rendering at all.
    Disabled,
    /// Key/value pairs merged into every file's template context.
    Fields(BTreeMap<String, TemplateValue>),
}

impl TemplateData {
    /// The field mapping, unless rendering is disabled.
    pub fn fields(&self) -> Option<&BTreeMap<String, TemplateValue>> {
        match self {
            Self::Fields(fields) => Some(fields),
            Self::Disabled => None,
        }
    }
}

impl Default for TemplateData {
    fn default() -> Self {
        Self::Fields(BTreeMap::new())
    }
}

impl FromIterator<(String, TemplateValue)> for TemplateData {
    fn from_iter<I: IntoIterator<Item = (String, TemplateValue)>>(iter: I) -> Self {
        Self::Fields(iter.into_iter().collect())
    }
}

// ── TemplateValue ────────────────────────────────────────────────────────────

/// A value reachable from a header template.
///
/// Closed variant: strings, numbers, booleans, and nested mappings (reached
/// with dotted paths). Mappings themselves cannot be interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Map(BTreeMap<String, TemplateValue>),
}

impl TemplateValue {
    /// The interpolated form, or `None` for nested mappings.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Int(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Map(_) => None,
        }
    }

    /// Descend one level into a nested mapping.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => f.write_str(&text),
            None => f.write_str("[object]"),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for TemplateValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for TemplateValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<BTreeMap<String, TemplateValue>> for TemplateValue {
    fn from(map: BTreeMap<String, TemplateValue>) -> Self {
        Self::Map(map)
    }
}

// ── TemplateContext ──────────────────────────────────────────────────────────

/// The per-file environment a header template is rendered against.
///
/// Always contains the `file` key (path, relative, basename, data); caller
/// data fields and the file's own data bag are merged at top level. Caller
/// keys are never silently dropped, and the reserved `file` key cannot be
/// shadowed.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateContext {
    values: BTreeMap<String, TemplateValue>,
}

impl TemplateContext {
    /// Build the context for one file.
    ///
    /// Precedence (last wins): caller data, file data, the `file` key.
    pub fn for_file(data: &TemplateData, file: &FileObject) -> Self {
        let mut values = BTreeMap::new();
        if let Some(fields) = data.fields() {
            for (key, value) in fields {
                values.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in file.data() {
            values.insert(key.clone(), value.clone());
        }
        values.insert("file".to_string(), file_value(file));
        Self { values }
    }

    /// Resolve a dotted reference such as `file.relative`.
    pub fn resolve(&self, reference: &str) -> Option<&TemplateValue> {
        let mut parts = reference.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Top-level lookup.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.values.get(key)
    }
}

/// The `file` entry: path (when present), relative identity, basename, and
/// the file's data bag nested under `data`.
fn file_value(file: &FileObject) -> TemplateValue {
    let mut map = BTreeMap::new();
    if let Some(path) = file.path() {
        map.insert(
            "path".to_string(),
            TemplateValue::Str(path.display().to_string()),
        );
    }
    map.insert(
        "relative".to_string(),
        TemplateValue::Str(file.relative().as_str().to_string()),
    );
    if let Some(basename) = file.basename() {
        map.insert(
            "basename".to_string(),
            TemplateValue::Str(basename.to_string()),
        );
    }
    if !file.data().is_empty() {
        map.insert("data".to_string(), TemplateValue::Map(file.data().clone()));
    }
    TemplateValue::Map(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> FileObject {
        FileObject::new("fixture/file.txt")
            .unwrap()
            .with_path("/work/fixture/file.txt")
    }

    #[test]
    fn context_always_contains_file() {
        let ctx = TemplateContext::for_file(&TemplateData::default(), &fixture());
        assert_eq!(
            ctx.resolve("file.relative"),
            Some(&TemplateValue::Str("fixture/file.txt".into()))
        );
        assert_eq!(
            ctx.resolve("file.basename"),
            Some(&TemplateValue::Str("file.txt".into()))
        );
    }

    #[test]
    fn caller_fields_are_visible_at_top_level() {
        let data: TemplateData = [("license".to_string(), TemplateValue::from("WTFPL"))]
            .into_iter()
            .collect();
        let ctx = TemplateContext::for_file(&data, &fixture());
        assert_eq!(ctx.get("license"), Some(&TemplateValue::Str("WTFPL".into())));
    }

    #[test]
    fn file_data_overrides_caller_data() {
        let data: TemplateData = [("owner".to_string(), TemplateValue::from("global"))]
            .into_iter()
            .collect();
        let file = fixture().with_data("owner", "per-file");
        let ctx = TemplateContext::for_file(&data, &file);
        assert_eq!(ctx.get("owner"), Some(&TemplateValue::Str("per-file".into())));
        // and the bag also stays reachable under file.data
        assert_eq!(
            ctx.resolve("file.data.owner"),
            Some(&TemplateValue::Str("per-file".into()))
        );
    }

    #[test]
    fn file_key_cannot_be_shadowed() {
        let data: TemplateData = [("file".to_string(), TemplateValue::from("nope"))]
            .into_iter()
            .collect();
        let ctx = TemplateContext::for_file(&data, &fixture());
        assert!(matches!(ctx.get("file"), Some(TemplateValue::Map(_))));
    }

    #[test]
    fn pathless_files_expose_no_path_key() {
        let file = FileObject::new("fixture/file.txt").unwrap();
        let ctx = TemplateContext::for_file(&TemplateData::default(), &file);
        assert_eq!(ctx.resolve("file.path"), None);
    }

    #[test]
    fn resolve_walks_nested_maps_only() {
        let ctx = TemplateContext::for_file(&TemplateData::default(), &fixture());
        assert_eq!(ctx.resolve("file.relative.deeper"), None);
        assert_eq!(ctx.resolve(""), None);
    }

    #[test]
    fn values_render_except_maps() {
        assert_eq!(TemplateValue::from("x").render(), Some("x".into()));
        assert_eq!(TemplateValue::from(7i64).render(), Some("7".into()));
        assert_eq!(TemplateValue::from(true).render(), Some("true".into()));
        assert_eq!(TemplateValue::Map(BTreeMap::new()).render(), None);
    }
}
