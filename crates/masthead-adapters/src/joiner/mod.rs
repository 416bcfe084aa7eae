//! Byte-piece concatenation with source-map combination.
//!
//! The joiner is the "trusted library" behind the `ContentJoiner` port: it
//! concatenates named pieces in order and rebases every contributed source
//! map into the combined output. A piece without a map shifts later pieces'
//! positions but contributes no mappings of its own.

mod vlq;

use masthead_core::{
    application::{
        ApplicationError,
        ports::{ContentJoiner, JoinPiece, Joined},
    },
    domain::{SOURCE_MAP_VERSION, SourceMap},
    error::MastheadResult,
};
use tracing::debug;

use vlq::Mapping;

/// Joiner that concatenates pieces and rebases their source maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceMapJoiner;

impl SourceMapJoiner {
    /// Create a new source-map-aware joiner.
    pub fn new() -> Self {
        Self
    }
}

impl ContentJoiner for SourceMapJoiner {
    fn join(&self, target: &str, pieces: Vec<JoinPiece>) -> MastheadResult<Joined> {
        let total: usize = pieces.iter().map(|piece| piece.content.len()).sum();
        let mut content = Vec::with_capacity(total);

        let mut builder = MapBuilder::new(target);
        let mut line_offset: u32 = 0;
        let mut col_offset: u32 = 0;

        for piece in pieces {
            if let Some(map) = &piece.source_map {
                builder
                    .add_map(map, line_offset, col_offset)
                    .map_err(|reason| ApplicationError::JoinFailed {
                        target: target.to_string(),
                        reason,
                    })?;
            }
            advance_offsets(&piece.content, &mut line_offset, &mut col_offset);
            content.extend_from_slice(&piece.content);
        }

        let source_map = builder.finish();
        if source_map.is_some() {
            debug!(target, "combined source map produced");
        }
        Ok(Joined {
            content,
            source_map,
        })
    }
}

/// Advance the running generated position past `bytes`.
fn advance_offsets(bytes: &[u8], line: &mut u32, col: &mut u32) {
    match bytes.iter().rposition(|b| *b == b'\n') {
        Some(last) => {
            *line += bytes[..=last].iter().filter(|b| **b == b'\n').count() as u32;
            *col = utf16_len(&bytes[last + 1..]);
        }
        None => *col += utf16_len(bytes),
    }
}

/// Column counting in UTF-16 code units, the unit the mappings format uses.
fn utf16_len(bytes: &[u8]) -> u32 {
    String::from_utf8_lossy(bytes).encode_utf16().count() as u32
}

/// Accumulates rebased mappings and interned source/name tables.
struct MapBuilder {
    target: String,
    sources: Vec<String>,
    sources_content: Vec<Option<String>>,
    names: Vec<String>,
    mappings: Vec<Mapping>,
    any_map: bool,
}

impl MapBuilder {
    fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            sources: Vec::new(),
            sources_content: Vec::new(),
            names: Vec::new(),
            mappings: Vec::new(),
            any_map: false,
        }
    }

    /// Rebase one contributed map by the current generated offset.
    ///
    /// Tokens on the map's first line shift by `col_offset` as well, since
    /// they share that generated line with whatever preceded them.
    fn add_map(&mut self, map: &SourceMap, line_offset: u32, col_offset: u32) -> Result<(), String> {
        map.validate().map_err(|e| e.to_string())?;
        let lines = vlq::decode_mappings(&map.mappings)?;

        let source_ids: Vec<u32> = map
            .sources
            .iter()
            .enumerate()
            .map(|(index, source)| self.intern_source(source, content_of(map, index)))
            .collect();
        let name_ids: Vec<u32> = map.names.iter().map(|name| self.intern_name(name)).collect();

        for (line_index, segments) in lines.iter().enumerate() {
            for segment in segments {
                let dst_line = line_offset + line_index as u32;
                let dst_col = if line_index == 0 {
                    col_offset + segment.generated_col
                } else {
                    segment.generated_col
                };
                let src = match segment.source {
                    Some((src_index, src_line, src_col)) => {
                        let interned = *source_ids
                            .get(src_index as usize)
                            .ok_or_else(|| format!("source index {src_index} out of range"))?;
                        Some((interned, src_line, src_col))
                    }
                    None => None,
                };
                let name = match segment.name {
                    Some(index) => Some(
                        *name_ids
                            .get(index as usize)
                            .ok_or_else(|| format!("name index {index} out of range"))?,
                    ),
                    None => None,
                };
                self.mappings.push(Mapping {
                    dst_line,
                    dst_col,
                    src,
                    name,
                });
            }
        }
        self.any_map = true;
        Ok(())
    }

    fn intern_source(&mut self, source: &str, content: Option<String>) -> u32 {
        if let Some(index) = self.sources.iter().position(|s| s == source) {
            return index as u32;
        }
        self.sources.push(source.to_string());
        self.sources_content.push(content);
        (self.sources.len() - 1) as u32
    }

    fn intern_name(&mut self, name: &str) -> u32 {
        if let Some(index) = self.names.iter().position(|n| n == name) {
            return index as u32;
        }
        self.names.push(name.to_string());
        (self.names.len() - 1) as u32
    }

    /// The combined map, or `None` when no piece contributed one.
    fn finish(self) -> Option<SourceMap> {
        if !self.any_map {
            return None;
        }
        let sources_content = self
            .sources_content
            .iter()
            .any(Option::is_some)
            .then_some(self.sources_content);
        Some(SourceMap {
            version: SOURCE_MAP_VERSION,
            file: Some(self.target),
            sources: self.sources,
            sources_content,
            names: self.names,
            mappings: vlq::encode_mappings(&self.mappings),
        })
    }
}

fn content_of(map: &SourceMap, index: usize) -> Option<String> {
    map.sources_content
        .as_ref()
        .and_then(|contents| contents.get(index))
        .and_then(|content| content.clone())
}
