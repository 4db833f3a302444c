mod composer;
mod config;
mod error;
mod fonts;
mod model;
pub mod petition;
mod pdf;
mod sink;
mod style;

pub use composer::{DEFAULT_SPACER_HEIGHT, DocumentComposer};
pub use config::{BlockConfig, DocumentConfig, FontConfig, StyleConfig, StyledBlock};
pub use error::Error;
pub use fonts::{FontRegistry, FontResource};
pub use model::{
    Composition, DocumentInfo, FRAME_PADDING, Margins, PageSize, PageText, TextBlock,
};
pub use sink::{FileSink, MemorySink, OutputSink};
pub use style::{Alignment, BaseStyle, StyleOverrides, StyleSpec, define_style};

use std::path::Path;

/// Render the built-in petition with `font_path` as its Arial face.
pub fn render_sample_petition(font_path: &Path, output: &Path) -> Result<Composition, Error> {
    DocumentConfig::sample(petition::SAMPLE_FONT_NAME, font_path, output).compose()
}
