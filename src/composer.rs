use std::path::Path;
use std::time::Instant;

use crate::error::Error;
use crate::fonts::FontRegistry;
use crate::model::{Composition, DocumentInfo, Flowable, Margins, PageSize, TextBlock};
use crate::pdf;
use crate::sink::{FileSink, OutputSink};
use crate::style::{self, StyleOverrides, StyleSpec};

/// Height of the blank region appended after every block, in points.
pub const DEFAULT_SPACER_HEIGHT: f32 = 12.0;

/// Builds paginated PDF documents from ordered text blocks.
///
/// Fonts are registered on the composer and looked up by name when styles
/// are defined and when documents are built. `compose` borrows the composer
/// immutably, so one set of registered fonts serves any number of documents.
pub struct DocumentComposer {
    registry: FontRegistry,
    margins: Margins,
    spacer_height: f32,
    info: DocumentInfo,
}

impl Default for DocumentComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentComposer {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
            margins: Margins::default(),
            spacer_height: DEFAULT_SPACER_HEIGHT,
            info: DocumentInfo::default(),
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_spacer_height(mut self, height: f32) -> Self {
        self.spacer_height = height;
        self
    }

    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn register_font(&mut self, name: &str, path: impl AsRef<Path>) -> Result<(), Error> {
        self.registry.register(name, path)
    }

    pub fn define_style(&self, base: &str, overrides: &StyleOverrides) -> Result<StyleSpec, Error> {
        style::define_style(&self.registry, base, overrides)
    }

    /// Lay out `blocks` under `style` and write the PDF to `output`.
    pub fn compose(
        &self,
        blocks: &[TextBlock],
        style: &StyleSpec,
        output: impl AsRef<Path>,
        page_size: PageSize,
    ) -> Result<Composition, Error> {
        let mut sink = FileSink::new(output.as_ref());
        self.compose_into(blocks, style, page_size, &mut sink)
    }

    pub fn compose_into(
        &self,
        blocks: &[TextBlock],
        style: &StyleSpec,
        page_size: PageSize,
        sink: &mut dyn OutputSink,
    ) -> Result<Composition, Error> {
        let t0 = Instant::now();

        if blocks.is_empty() {
            return Err(Error::EmptyInput);
        }
        if !(self.spacer_height.is_finite() && self.spacer_height >= 0.0) {
            return Err(Error::InvalidStyle(format!(
                "spacer height must not be negative, got {}",
                self.spacer_height
            )));
        }
        style.validate(&self.registry)?;

        let mut flowables = Vec::with_capacity(blocks.len() * 2);
        let mut paragraphs = Vec::with_capacity(blocks.len());
        for block in blocks {
            let block_style = match &block.overrides {
                Some(o) if !o.is_empty() => style.derive(&self.registry, o)?,
                _ => style.clone(),
            };
            let text = block.text.trim().to_string();
            paragraphs.push(text.clone());
            flowables.push(Flowable::Paragraph {
                text,
                style: block_style,
            });
            flowables.push(Flowable::Spacer {
                height: self.spacer_height,
            });
        }
        let t_build = t0.elapsed();

        let rendered = pdf::render(&flowables, &self.registry, page_size, self.margins, &self.info)?;
        let t_render = t0.elapsed();

        sink.write_document(&rendered.bytes)?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: build={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms ({} blocks, {} pages, output {} bytes)",
            t_build.as_secs_f64() * 1000.0,
            (t_render - t_build).as_secs_f64() * 1000.0,
            (t_total - t_render).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            blocks.len(),
            rendered.pages.len(),
            rendered.bytes.len(),
        );

        Ok(Composition {
            output: sink.location().map(Path::to_path_buf),
            page_size,
            paragraphs,
            pages: rendered.pages,
            byte_len: rendered.bytes.len(),
        })
    }
}
