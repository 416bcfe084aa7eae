//! The unit of work flowing through the host pipeline.
//!
//! A `FileObject` is owned by the host pipeline. The transform takes
//! exclusive transient ownership for the duration of one call (via `&mut`),
//! may update `contents` and `source_map` in place, and hands the same
//! identity back on emission - it never clones or destroys files.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::domain::entities::common::RelativePath;
use crate::domain::entities::source_map::SourceMap;
use crate::domain::error::DomainError;
use crate::domain::value_objects::TemplateValue;

/// A live byte stream handed over by the host pipeline.
///
/// Read errors are observed by whoever consumes the stream, not by the
/// transform itself.
pub type ByteStream = Box<dyn Read + Send>;

/// File content in one of two mutually exclusive modes.
pub enum Contents {
    /// The whole payload held in memory.
    Buffered(Vec<u8>),
    /// A live stream; the transform never buffers the payload.
    Streamed(ByteStream),
}

impl Contents {
    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffered(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Streamed(_))
    }

    /// Splice `prefix` ahead of this content.
    ///
    /// Total over both modes: buffered content gets the prefix prepended in
    /// memory; streamed content is chained behind a cursor, so a reader
    /// observes the prefix bytes first, then the original stream's bytes,
    /// with errors from the original stream reaching that reader untouched.
    pub fn splice_prefix(self, prefix: Vec<u8>) -> Self {
        match self {
            Self::Buffered(mut body) => {
                let mut joined = prefix;
                joined.append(&mut body);
                Self::Buffered(joined)
            }
            Self::Streamed(inner) => {
                Self::Streamed(Box::new(io::Cursor::new(prefix).chain(inner)))
            }
        }
    }
}

impl Default for Contents {
    fn default() -> Self {
        Self::Buffered(Vec::new())
    }
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered(bytes) => f.debug_tuple("Buffered").field(&bytes.len()).finish(),
            Self::Streamed(_) => f.write_str("Streamed(..)"),
        }
    }
}

/// The unit of work.
#[derive(Debug)]
pub struct FileObject {
    /// Absolute location on the backing store, if the file has one.
    path: Option<PathBuf>,
    /// Identity relative to the pipeline base; also the source-map join key.
    relative: RelativePath,
    contents: Contents,
    source_map: Option<SourceMap>,
    /// Per-file key/value bag, visible to header templates.
    data: BTreeMap<String, TemplateValue>,
}

impl FileObject {
    /// Create a file with empty buffered contents.
    pub fn new(relative: impl Into<PathBuf>) -> Result<Self, DomainError> {
        Ok(Self {
            path: None,
            relative: RelativePath::try_new(relative)?,
            contents: Contents::default(),
            source_map: None,
            data: BTreeMap::new(),
        })
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_contents(mut self, contents: Contents) -> Self {
        self.contents = contents;
        self
    }

    pub fn with_buffer(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.with_contents(Contents::Buffered(bytes.into()))
    }

    pub fn with_stream(self, stream: ByteStream) -> Self {
        self.with_contents(Contents::Streamed(stream))
    }

    pub fn with_source_map(mut self, map: SourceMap) -> Self {
        self.source_map = Some(map);
        self
    }

    /// Attach one entry to the per-file data bag.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn relative(&self) -> &RelativePath {
        &self.relative
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    pub fn data(&self) -> &BTreeMap<String, TemplateValue> {
        &self.data
    }

    /// Basename of the backing path, used as the display name in templates.
    pub fn basename(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }

    pub fn is_buffer(&self) -> bool {
        self.contents.is_buffer()
    }

    pub fn is_stream(&self) -> bool {
        self.contents.is_stream()
    }

    /// Take the contents out, leaving an empty buffer behind.
    pub fn take_contents(&mut self) -> Contents {
        std::mem::take(&mut self.contents)
    }

    pub fn set_contents(&mut self, contents: Contents) {
        self.contents = contents;
    }

    pub fn take_source_map(&mut self) -> Option<SourceMap> {
        self.source_map.take()
    }

    pub fn set_source_map(&mut self, map: SourceMap) {
        self.source_map = Some(map);
    }

    /// Consume the file, yielding its contents (for downstream readers).
    pub fn into_contents(self) -> Contents {
        self.contents
    }
}

/// What the host pipeline hands to the transform: a real file, or a bare
/// name used solely for display-name derivation.
#[derive(Debug)]
pub enum PipelineItem {
    Name(String),
    File(FileObject),
}

impl PipelineItem {
    pub fn as_file(&self) -> Option<&FileObject> {
        match self {
            Self::File(file) => Some(file),
            Self::Name(_) => None,
        }
    }

    pub fn into_file(self) -> Option<FileObject> {
        match self {
            Self::File(file) => Some(file),
            Self::Name(_) => None,
        }
    }
}

impl From<FileObject> for PipelineItem {
    fn from(file: FileObject) -> Self {
        Self::File(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_mode_queries_are_exclusive() {
        let buffered = Contents::Buffered(b"x".to_vec());
        assert!(buffered.is_buffer() && !buffered.is_stream());

        let streamed = Contents::Streamed(Box::new(io::Cursor::new(b"x".to_vec())));
        assert!(streamed.is_stream() && !streamed.is_buffer());
    }

    #[test]
    fn splice_prefix_on_buffer_prepends() {
        let contents = Contents::Buffered(b"world".to_vec());
        match contents.splice_prefix(b"hello ".to_vec()) {
            Contents::Buffered(bytes) => assert_eq!(bytes, b"hello world"),
            Contents::Streamed(_) => panic!("buffered input must stay buffered"),
        }
    }

    #[test]
    fn splice_prefix_on_stream_chains() {
        let contents = Contents::Streamed(Box::new(io::Cursor::new(b"world".to_vec())));
        match contents.splice_prefix(b"hello ".to_vec()) {
            Contents::Streamed(mut stream) => {
                let mut read = Vec::new();
                stream.read_to_end(&mut read).unwrap();
                assert_eq!(read, b"hello world");
            }
            Contents::Buffered(_) => panic!("streamed input must stay streamed"),
        }
    }

    #[test]
    fn basename_comes_from_path() {
        let file = FileObject::new("fixture/file.txt")
            .unwrap()
            .with_path("/work/fixture/file.txt");
        assert_eq!(file.basename(), Some("file.txt"));

        let pathless = FileObject::new("fixture/file.txt").unwrap();
        assert_eq!(pathless.basename(), None);
    }

    #[test]
    fn take_contents_leaves_an_empty_buffer() {
        let mut file = FileObject::new("a.txt").unwrap().with_buffer(b"abc".to_vec());
        let taken = file.take_contents();
        assert!(taken.is_buffer());
        match file.contents() {
            Contents::Buffered(bytes) => assert!(bytes.is_empty()),
            Contents::Streamed(_) => panic!("placeholder must be buffered"),
        }
    }

    #[test]
    fn rejects_absolute_relative_identity() {
        assert!(FileObject::new("/abs/file.txt").is_err());
    }
}
