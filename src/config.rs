use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::composer::{DEFAULT_SPACER_HEIGHT, DocumentComposer};
use crate::error::Error;
use crate::model::{Composition, DocumentInfo, Margins, PageSize, TextBlock};
use crate::petition;
use crate::style::{Alignment, StyleOverrides};

/// Everything needed to build one document, as read from a JSON file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    pub output: PathBuf,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_spacer")]
    pub spacer: f32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub fonts: Vec<FontConfig>,
    pub style: StyleConfig,
    pub blocks: Vec<BlockConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontConfig {
    pub name: String,
    pub path: PathBuf,
}

/// The document style: a base sheet name plus the override fields, side by side.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "StyleTable")]
pub struct StyleConfig {
    pub base: String,
    pub overrides: StyleOverrides,
}

// Mirrors `StyleOverrides` field by field so unknown keys are rejected.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StyleTable {
    #[serde(default = "default_base")]
    base: String,
    name: Option<String>,
    font: Option<String>,
    font_size: Option<f32>,
    leading: Option<f32>,
    space_before: Option<f32>,
    space_after: Option<f32>,
    alignment: Option<Alignment>,
    first_line_indent: Option<f32>,
}

impl From<StyleTable> for StyleConfig {
    fn from(t: StyleTable) -> Self {
        Self {
            base: t.base,
            overrides: StyleOverrides {
                name: t.name,
                font: t.font,
                font_size: t.font_size,
                leading: t.leading,
                space_before: t.space_before,
                space_after: t.space_after,
                alignment: t.alignment,
                first_line_indent: t.first_line_indent,
            },
        }
    }
}

/// A block is either a bare string or `{ "text": ..., "style": { ... } }`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum BlockConfig {
    Plain(String),
    Styled(StyledBlock),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyledBlock {
    pub text: String,
    #[serde(default)]
    pub style: Option<StyleOverrides>,
}

fn default_spacer() -> f32 {
    DEFAULT_SPACER_HEIGHT
}

fn default_base() -> String {
    petition::SAMPLE_BASE_STYLE.to_string()
}

impl From<&BlockConfig> for TextBlock {
    fn from(block: &BlockConfig) -> Self {
        match block {
            BlockConfig::Plain(text) => TextBlock::new(text.as_str()),
            BlockConfig::Styled(block) => TextBlock {
                text: block.text.clone(),
                overrides: block.style.clone(),
            },
        }
    }
}

impl DocumentConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// The built-in petition, rendered with the font at `font_path` registered as
    /// `font_name` and used by the petition style.
    pub fn sample(
        font_name: &str,
        font_path: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        let overrides = StyleOverrides {
            font: Some(font_name.to_string()),
            ..petition::juridico_arial()
        };
        Self {
            output: output.into(),
            page_size: PageSize::A4,
            margins: Margins::default(),
            spacer: DEFAULT_SPACER_HEIGHT,
            title: None,
            author: None,
            fonts: vec![FontConfig {
                name: font_name.to_string(),
                path: font_path.into(),
            }],
            style: StyleConfig {
                base: petition::SAMPLE_BASE_STYLE.to_string(),
                overrides,
            },
            blocks: petition::sample_blocks()
                .into_iter()
                .map(|b| BlockConfig::Plain(b.text))
                .collect(),
        }
    }

    pub fn blocks(&self) -> Vec<TextBlock> {
        self.blocks.iter().map(TextBlock::from).collect()
    }

    /// Register fonts, resolve the style, and write the document to `output`.
    pub fn compose(&self) -> Result<Composition, Error> {
        let mut composer = DocumentComposer::new()
            .with_margins(self.margins)
            .with_spacer_height(self.spacer)
            .with_info(DocumentInfo {
                title: self.title.clone(),
                author: self.author.clone(),
            });
        for font in &self.fonts {
            composer.register_font(&font.name, &font.path)?;
        }
        let style = composer.define_style(&self.style.base, &self.style.overrides)?;
        composer.compose(&self.blocks(), &style, &self.output, self.page_size)
    }
}
