//! Header Service - the per-item transform orchestrator.
//!
//! For every pipeline item it receives, produce an equivalent item whose
//! content begins with the rendered header, without breaking source-map
//! accuracy, and without holding more than one item in flight per call:
//! 1. Eligibility check (passthrough gate)
//! 2. Display-name derivation
//! 3. Header rendering
//! 4. Merge - splice for streams, join for buffers
//! 5. Source-map propagation and emission
//!
//! It implements the driving surface the host pipeline calls and uses the
//! driven ports (renderer, joiner, probe).

use tracing::{debug, instrument};

use crate::{
    application::ports::{ContentJoiner, JoinPiece, PathProbe, TemplateRenderer},
    domain::{Contents, FileObject, HeaderConfig, PipelineItem, TemplateContext, TemplateData},
    error::MastheadResult,
};

/// Prepends a rendered header to every eligible file.
///
/// Items are processed strictly one at a time, in arrival order; output
/// order therefore equals input order. Each constructed instance owns its
/// configuration and adapters and shares no state with other instances, so
/// independent instances may run concurrently over disjoint file sequences.
pub struct HeaderService {
    config: HeaderConfig,
    renderer: Box<dyn TemplateRenderer>,
    joiner: Box<dyn ContentJoiner>,
    probe: Box<dyn PathProbe>,
}

impl HeaderService {
    /// Create a new header service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use masthead_core::application::{HeaderService, ports::*};
    ///
    /// let service = HeaderService::new(
    ///     config,   // HeaderConfig
    ///     renderer, // impl TemplateRenderer
    ///     joiner,   // impl ContentJoiner
    ///     probe,    // impl PathProbe
    /// );
    /// ```
    pub fn new(
        config: HeaderConfig,
        renderer: Box<dyn TemplateRenderer>,
        joiner: Box<dyn ContentJoiner>,
        probe: Box<dyn PathProbe>,
    ) -> Self {
        Self {
            config,
            renderer,
            joiner,
            probe,
        }
    }

    /// Transform one item in place.
    ///
    /// `Ok(())` means the item was emitted: the same identity, contents and
    /// source map possibly updated. An error means rendering or joining
    /// failed and the item must not be forwarded. Ineligible items (bare
    /// names, path-less files, directories, missing paths) pass through
    /// byte-identical.
    pub fn process(&self, item: &mut PipelineItem) -> MastheadResult<()> {
        match item {
            PipelineItem::Name(name) => {
                debug!(name = %name, "bare name, forwarded unchanged");
                Ok(())
            }
            PipelineItem::File(file) => self.process_file(file),
        }
    }

    /// Transform a whole sequence, preserving input order.
    ///
    /// Fails fast on the first rendering or joining error. An empty input
    /// yields an empty output and normal completion, not an error.
    pub fn process_all(&self, items: Vec<PipelineItem>) -> MastheadResult<Vec<PipelineItem>> {
        let mut emitted = Vec::with_capacity(items.len());
        for mut item in items {
            self.process(&mut item)?;
            emitted.push(item);
        }
        Ok(emitted)
    }

    #[instrument(skip_all, fields(file = %file.relative()))]
    fn process_file(&self, file: &mut FileObject) -> MastheadResult<()> {
        if !self.eligible(file) {
            debug!("ineligible, passthrough");
            return Ok(());
        }

        let name = display_name_of(file);
        // Render before touching the file: a template error must leave it
        // unmodified and unforwarded.
        let header = self.render_header(file)?;

        // The merge is total over the two content modes; a joined buffer can
        // never overwrite a stream, nor the other way around.
        match file.take_contents() {
            Contents::Streamed(inner) => {
                file.set_contents(
                    Contents::Streamed(inner).splice_prefix(header.into_bytes()),
                );
                debug!("header spliced ahead of content stream");
            }
            Contents::Buffered(body) => {
                let source_map = file.take_source_map();
                let pieces = vec![
                    JoinPiece::unmapped(name.clone(), header.into_bytes()),
                    JoinPiece::mapped(file.relative().as_str(), body, source_map),
                ];
                let joined = self.joiner.join(&name, pieces)?;
                file.set_contents(Contents::Buffered(joined.content));
                if let Some(map) = joined.source_map {
                    file.set_source_map(map);
                }
                debug!("header joined into buffer");
            }
        }
        Ok(())
    }

    /// The passthrough gate: a file is templated only when it has a path and
    /// the probe confirms an existing, non-directory entry. Probe failures
    /// already read as `false`, so this can never escalate.
    fn eligible(&self, file: &FileObject) -> bool {
        match file.path() {
            Some(path) => self.probe.is_processable_file(path),
            None => false,
        }
    }

    fn render_header(&self, file: &FileObject) -> MastheadResult<String> {
        match self.config.data() {
            TemplateData::Disabled => Ok(self.config.header_text().to_string()),
            data @ TemplateData::Fields(_) => {
                let context = TemplateContext::for_file(data, file);
                self.renderer.render(self.config.header_text(), &context)
            }
        }
    }
}

/// Human-meaningful name for templates and join keys: a bare name is used
/// directly, a file contributes its path's basename, anything else is the
/// empty string.
pub fn display_name(item: &PipelineItem) -> String {
    match item {
        PipelineItem::Name(name) => name.clone(),
        PipelineItem::File(file) => display_name_of(file),
    }
}

fn display_name_of(file: &FileObject) -> String {
    file.basename().unwrap_or_default().to_string()
}
