use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::style::{StyleOverrides, StyleSpec};

/// One unit of petition text. Surrounding whitespace is trimmed at compose time.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub overrides: Option<StyleOverrides>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            overrides: None,
        }
    }

    pub fn with_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }
}

impl From<&str> for TextBlock {
    fn from(text: &str) -> Self {
        TextBlock::new(text)
    }
}

impl From<String> for TextBlock {
    fn from(text: String) -> Self {
        TextBlock::new(text)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom {
        width: f32,
        height: f32,
    },
}

impl PageSize {
    /// (width, height) in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.2756, 841.8898),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    /// Accepts `a4`, `letter`, `legal` (any case) or `WIDTHxHEIGHT` in points.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| format!("unknown page size '{s}'"))?;
                let width: f32 = w.trim().parse().map_err(|_| format!("bad page width in '{s}'"))?;
                let height: f32 = h.trim().parse().map_err(|_| format!("bad page height in '{s}'"))?;
                if !(width > 0.0 && height > 0.0) {
                    return Err(format!("page size must be positive, got '{s}'"));
                }
                Ok(PageSize::Custom { width, height })
            }
        }
    }
}

impl TryFrom<String> for PageSize {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 72.0,
            bottom: 72.0,
            left: 72.0,
            right: 72.0,
        }
    }
}

/// Inset of the text frame inside the margins, on every side.
pub const FRAME_PADDING: f32 = 6.0;

impl Margins {
    /// Left edge of the text frame.
    pub fn frame_left(&self) -> f32 {
        self.left + FRAME_PADDING
    }

    /// Width of the text frame on a page `page_width` points wide.
    pub fn frame_width(&self, page_width: f32) -> f32 {
        page_width - self.left - self.right - 2.0 * FRAME_PADDING
    }

    /// Top and bottom of the text frame on a page `page_height` points tall.
    pub fn frame_vertical(&self, page_height: f32) -> (f32, f32) {
        (
            page_height - self.top - FRAME_PADDING,
            self.bottom + FRAME_PADDING,
        )
    }
}

pub(crate) enum Flowable {
    Paragraph { text: String, style: StyleSpec },
    Spacer { height: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Text laid out on one page, one entry per line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageText {
    pub lines: Vec<String>,
}

/// Description of a built document.
#[derive(Clone, Debug)]
pub struct Composition {
    pub output: Option<PathBuf>,
    pub page_size: PageSize,
    pub paragraphs: Vec<String>,
    pub pages: Vec<PageText>,
    pub byte_len: usize,
}

impl Composition {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All laid-out lines, page by page, joined with newlines.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
