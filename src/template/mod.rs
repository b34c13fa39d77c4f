//! # Template Model
//!
//! The persisted calibration record: a background form image, its intrinsic
//! size, and the fields placed on it.
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "templateImage": "data:image/png;base64,...",
//!   "templateSize": { "width": 1240, "height": 1754 },
//!   "fields": [
//!     { "id": "netAmount", "x": 80.0, "y": 90.0, "fontSize": 12,
//!       "fontWeight": "bold", "align": "right" }
//!   ],
//!   "globalFontFamily": "'Courier New', Courier, monospace",
//!   "globalFontSize": 12
//! }
//! ```
//!
//! Every attribute is optional on load. Older records that predate an
//! attribute get its default; attributes written by newer versions are
//! ignored.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, TemplateStore};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_FONT_FAMILY;
use crate::error::OverprintError;
use crate::geometry::Size;

pub use crate::geometry::Align;

/// Smallest font size the editor accepts.
pub const MIN_FONT_SIZE: u32 = 8;

/// Largest font size the editor accepts.
pub const MAX_FONT_SIZE: u32 = 32;

/// Font size of newly placed fields.
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// Clamp a font size into the editor's accepted range.
pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// Font weight of a placed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Intrinsic pixel size of the uploaded form image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TemplateSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 1000,
        }
    }
}

impl TemplateSize {
    /// Displayed size when the template is shown at most `max_width` wide.
    ///
    /// Images narrower than `max_width` are shown at their intrinsic size.
    pub fn fit_width(&self, max_width: f64) -> Size {
        if self.width == 0 {
            return Size::new(0.0, 0.0);
        }
        let width = (self.width as f64).min(max_width);
        let height = width / self.width as f64 * self.height as f64;
        Size::new(width, height)
    }
}

/// Background form image, stored inline as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackgroundImage(String);

impl BackgroundImage {
    /// Wrap an existing data URL (e.g. from a stored record).
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Decode uploaded image bytes, returning the inline image and its
    /// intrinsic size.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, TemplateSize), OverprintError> {
        let format = image::guess_format(bytes)
            .map_err(|e| OverprintError::Image(format!("Unrecognized image format: {}", e)))?;
        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| OverprintError::Image(format!("Failed to decode image: {}", e)))?;

        let size = TemplateSize {
            width: img.width(),
            height: img.height(),
        };
        if size.width == 0 || size.height == 0 {
            return Err(OverprintError::Image("Image has no pixels".to_string()));
        }

        let url = format!(
            "data:{};base64,{}",
            format.to_mime_type(),
            STANDARD.encode(bytes)
        );
        Ok((Self(url), size))
    }

    pub fn data_url(&self) -> &str {
        &self.0
    }
}

/// One field's position and style on the template.
///
/// `x` and `y` are percentages (0-100) of whatever surface the template is
/// shown on, never pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPlacement {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub align: Align,
}

impl FieldPlacement {
    /// A new placement with the style given to freshly dropped fields.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::Normal,
            align: Align::Center,
        }
    }
}

/// The single active template configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(default)]
    pub template_image: Option<BackgroundImage>,
    #[serde(default)]
    pub template_size: TemplateSize,
    #[serde(default)]
    pub fields: Vec<FieldPlacement>,
    #[serde(default = "default_font_family")]
    pub global_font_family: String,
    #[serde(default = "default_font_size")]
    pub global_font_size: u32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            template_image: None,
            template_size: TemplateSize::default(),
            fields: Vec::new(),
            global_font_family: default_font_family(),
            global_font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl TemplateConfig {
    pub fn field(&self, id: &str) -> Option<&FieldPlacement> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldPlacement> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    /// Fail with [`OverprintError::NoTemplate`] unless at least one field is
    /// placed.
    pub fn ensure_printable(&self) -> Result<(), OverprintError> {
        if self.fields.is_empty() {
            Err(OverprintError::NoTemplate)
        } else {
            Ok(())
        }
    }

    /// Check a record received from outside the editor.
    ///
    /// Each id may appear once, positions must be percentages in `[0, 100]`
    /// and font sizes must be in the editor's range. Ids missing from the
    /// catalog are accepted so records from older catalogs can be written
    /// back; they resolve to empty text.
    pub fn validate(&self) -> Result<(), OverprintError> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(OverprintError::Config(format!(
                    "Field '{}' is placed more than once",
                    field.id
                )));
            }
            for (axis, value) in [("x", field.x), ("y", field.y)] {
                if !(0.0..=100.0).contains(&value) {
                    return Err(OverprintError::Config(format!(
                        "Field '{}' has {} = {}, expected 0 to 100",
                        field.id, axis, value
                    )));
                }
            }
            if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&field.font_size) {
                return Err(OverprintError::Config(format!(
                    "Field '{}' has font size {}, expected {} to {}",
                    field.id, field.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
                )));
            }
        }
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&self.global_font_size) {
            return Err(OverprintError::Config(format!(
                "Global font size {} is outside {} to {}",
                self.global_font_size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        Ok(())
    }

    /// Parse a stored record, defaulting missing attributes.
    pub fn from_json(json: &str) -> Result<Self, OverprintError> {
        let mut config: TemplateConfig = serde_json::from_str(json)?;
        if config.global_font_family.trim().is_empty() {
            config.global_font_family = default_font_family();
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, OverprintError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_defaults_for_old_records() {
        let json = r#"{
            "templateImage": null,
            "templateSize": {"width": 1000, "height": 1400},
            "fields": [{"id": "year", "label": "Year", "x": 10, "y": 20}]
        }"#;
        let config = TemplateConfig::from_json(json).unwrap();
        assert_eq!(config.global_font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(config.global_font_size, 12);
        let field = config.field("year").unwrap();
        assert_eq!(field.font_size, 12);
        assert_eq!(field.font_weight, FontWeight::Normal);
        assert_eq!(field.align, Align::Left);
    }

    #[test]
    fn test_unknown_attributes_ignored() {
        let json = r#"{"fields": [], "version": 7, "paperTray": "manual"}"#;
        let config = TemplateConfig::from_json(json).unwrap();
        assert_eq!(config, TemplateConfig::default());
    }

    #[test]
    fn test_blank_font_family_defaults() {
        let config = TemplateConfig::from_json(r#"{"globalFontFamily": ""}"#).unwrap();
        assert_eq!(config.global_font_family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_placement_serializes_camel_case() {
        let mut p = FieldPlacement::new("netAmount", 80.0, 90.0);
        p.font_weight = FontWeight::Bold;
        p.align = Align::Right;
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["fontSize"], 12);
        assert_eq!(json["fontWeight"], "bold");
        assert_eq!(json["align"], "right");
    }

    #[test]
    fn test_fit_width() {
        let size = TemplateSize {
            width: 1200,
            height: 1800,
        };
        assert_eq!(size.fit_width(600.0), Size::new(600.0, 900.0));
        let small = TemplateSize {
            width: 400,
            height: 500,
        };
        assert_eq!(small.fit_width(600.0), Size::new(400.0, 500.0));
    }

    #[test]
    fn test_background_from_png() {
        let (bg, size) = BackgroundImage::from_bytes(&png_bytes(30, 40)).unwrap();
        assert_eq!(size, TemplateSize { width: 30, height: 40 });
        assert!(bg.data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_background_rejects_garbage() {
        let err = BackgroundImage::from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, OverprintError::Image(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = TemplateConfig::default();
        config.fields.push(FieldPlacement::new("day31", 1.0, 1.0));
        assert!(config.validate().is_ok());

        config.fields.push(FieldPlacement::new("day31", 2.0, 2.0));
        assert!(matches!(config.validate(), Err(OverprintError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_stale_ids() {
        let mut config = TemplateConfig::default();
        config.fields.push(FieldPlacement::new("customerPhone", 2.0, 2.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = TemplateConfig::default();
        config.fields.push(FieldPlacement::new("netAmount", 100.0, 0.0));
        assert!(config.validate().is_ok());

        config.fields[0].x = 100.5;
        assert!(matches!(config.validate(), Err(OverprintError::Config(_))));

        config.fields[0].x = 50.0;
        config.fields[0].y = f64::NAN;
        assert!(matches!(config.validate(), Err(OverprintError::Config(_))));

        config.fields[0].y = 50.0;
        config.fields[0].font_size = 400;
        assert!(matches!(config.validate(), Err(OverprintError::Config(_))));

        config.fields[0].font_size = MAX_FONT_SIZE;
        config.global_font_size = 4;
        assert!(matches!(config.validate(), Err(OverprintError::Config(_))));
    }

    #[test]
    fn test_ensure_printable() {
        let mut config = TemplateConfig::default();
        assert!(matches!(config.ensure_printable(), Err(OverprintError::NoTemplate)));
        config.fields.push(FieldPlacement::new("year", 1.0, 1.0));
        assert!(config.ensure_printable().is_ok());
    }
}
