//! Source Map revision 3 payload.
//!
//! This is the value object only: the `mappings` field stays in its VLQ
//! form, and combining maps across a join lives behind the `ContentJoiner`
//! port. The payload must stay valid after header insertion.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The revision this crate understands.
pub const SOURCE_MAP_VERSION: u32 = 3;

/// A structured source-map payload, as attached to a file by upstream
/// pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMap {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(rename = "sourcesContent", skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub mappings: String,
}

impl SourceMap {
    /// An empty revision 3 map.
    pub fn empty() -> Self {
        Self {
            version: SOURCE_MAP_VERSION,
            file: None,
            sources: Vec::new(),
            sources_content: None,
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    /// Parse a serialized map, rejecting unsupported revisions.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let map: Self = serde_json::from_str(json).map_err(|e| DomainError::InvalidSourceMap {
            reason: e.to_string(),
        })?;
        map.validate()?;
        Ok(map)
    }

    /// Serialized wire form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("source map payload serializes to plain JSON")
    }

    /// Gate on the supported revision.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.version != SOURCE_MAP_VERSION {
            return Err(DomainError::UnsupportedSourceMapVersion {
                version: self.version,
            });
        }
        Ok(())
    }
}
