use serde::Deserialize;

use crate::error::Error;
use crate::fonts::FontRegistry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Built-in style sheet. Every entry names `Helvetica`, which is never
/// registered implicitly: a usable style must override `font`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseStyle {
    Normal,
    BodyText,
    Title,
    Heading1,
    Heading2,
}

impl BaseStyle {
    pub const ALL: [BaseStyle; 5] = [
        BaseStyle::Normal,
        BaseStyle::BodyText,
        BaseStyle::Title,
        BaseStyle::Heading1,
        BaseStyle::Heading2,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseStyle::Normal => "Normal",
            BaseStyle::BodyText => "BodyText",
            BaseStyle::Title => "Title",
            BaseStyle::Heading1 => "Heading1",
            BaseStyle::Heading2 => "Heading2",
        }
    }

    pub fn spec(self) -> StyleSpec {
        let normal = StyleSpec {
            name: "Normal".into(),
            font: "Helvetica".into(),
            font_size: 10.0,
            leading: 12.0,
            space_before: 0.0,
            space_after: 0.0,
            alignment: Alignment::Left,
            first_line_indent: 0.0,
        };
        match self {
            BaseStyle::Normal => normal,
            BaseStyle::BodyText => StyleSpec {
                name: "BodyText".into(),
                space_before: 6.0,
                ..normal
            },
            BaseStyle::Title => StyleSpec {
                name: "Title".into(),
                font: "Helvetica-Bold".into(),
                font_size: 18.0,
                leading: 22.0,
                space_after: 6.0,
                alignment: Alignment::Center,
                ..normal
            },
            BaseStyle::Heading1 => StyleSpec {
                name: "Heading1".into(),
                font: "Helvetica-Bold".into(),
                font_size: 18.0,
                leading: 22.0,
                space_after: 6.0,
                ..normal
            },
            BaseStyle::Heading2 => StyleSpec {
                name: "Heading2".into(),
                font: "Helvetica-Bold".into(),
                font_size: 14.0,
                leading: 18.0,
                space_before: 12.0,
                space_after: 6.0,
                ..normal
            },
        }
    }
}

/// Fully resolved typographic attributes of a paragraph. Sizes are in points.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSpec {
    pub name: String,
    pub font: String,
    pub font_size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub alignment: Alignment,
    pub first_line_indent: f32,
}

/// Partial style; `None` keeps the parent's value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverrides {
    pub name: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
    pub leading: Option<f32>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
    pub alignment: Option<Alignment>,
    pub first_line_indent: Option<f32>,
}

impl StyleOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl StyleSpec {
    /// Resolve `overrides` on top of this style and check the result against `registry`.
    pub fn derive(&self, registry: &FontRegistry, overrides: &StyleOverrides) -> Result<StyleSpec, Error> {
        let o = overrides.clone();
        let spec = StyleSpec {
            name: o.name.unwrap_or_else(|| self.name.clone()),
            font: o.font.unwrap_or_else(|| self.font.clone()),
            font_size: o.font_size.unwrap_or(self.font_size),
            leading: o.leading.unwrap_or(self.leading),
            space_before: o.space_before.unwrap_or(self.space_before),
            space_after: o.space_after.unwrap_or(self.space_after),
            alignment: o.alignment.unwrap_or(self.alignment),
            first_line_indent: o.first_line_indent.unwrap_or(self.first_line_indent),
        };
        spec.validate(registry)?;
        Ok(spec)
    }

    pub(crate) fn validate(&self, registry: &FontRegistry) -> Result<(), Error> {
        let positive = [("font_size", self.font_size), ("leading", self.leading)];
        for (field, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::InvalidStyle(format!(
                    "{}: {field} must be positive, got {v}",
                    self.name
                )));
            }
        }
        let non_negative = [
            ("space_before", self.space_before),
            ("space_after", self.space_after),
            ("first_line_indent", self.first_line_indent),
        ];
        for (field, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::InvalidStyle(format!(
                    "{}: {field} must not be negative, got {v}",
                    self.name
                )));
            }
        }
        if !registry.contains(&self.font) {
            return Err(Error::UnknownFont(self.font.clone()));
        }
        if self.leading < self.font_size {
            log::warn!(
                "style {}: leading {} is smaller than font size {}, lines may overlap",
                self.name,
                self.leading,
                self.font_size
            );
        }
        Ok(())
    }
}

/// Build a style from a built-in base style and a set of overrides.
pub fn define_style(
    registry: &FontRegistry,
    base: &str,
    overrides: &StyleOverrides,
) -> Result<StyleSpec, Error> {
    let base = BaseStyle::from_name(base).ok_or_else(|| Error::UnknownStyle(base.to_string()))?;
    base.spec().derive(registry, overrides)
}
