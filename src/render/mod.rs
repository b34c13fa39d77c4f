//! # Rendering Module
//!
//! Lays a calibrated template out onto a concrete surface and resolves the
//! text each field shows.
//!
//! ## Targets
//!
//! | Target  | Surface                         | Background |
//! |---------|---------------------------------|------------|
//! | Editor  | template fit to 600 px wide     | visible    |
//! | Preview | template fit to 700 px wide     | visible    |
//! | Print   | physical page in mm (A4)        | opacity 0  |
//!
//! On every target a field is anchored at `(x%, y%)` of the surface and
//! shifted by the alignment fraction of its own width (see
//! [`geometry`](crate::geometry)), so a calibration made on one target holds
//! on the others.
//!
//! ## Usage Example
//!
//! ```
//! use overprint::render::{PrintRenderer, html};
//! use overprint::resolve::SettlementRecord;
//! use overprint::template::{Align, FieldPlacement, TemplateConfig};
//!
//! let mut config = TemplateConfig::default();
//! let mut net = FieldPlacement::new("netAmount", 80.0, 90.0);
//! net.align = Align::Right;
//! config.fields.push(net);
//!
//! let settlement = SettlementRecord { net_amount: Some(-1234.5), ..Default::default() };
//! let surface = PrintRenderer::default().render(&config, &settlement, &[])?;
//! assert_eq!(surface.items[0].text, "-1,234.50");
//!
//! let page = html::to_html(&surface);
//! assert!(page.contains("translateX(-100%)"));
//! # Ok::<(), overprint::OverprintError>(())
//! ```

pub mod html;

use serde::Serialize;

use crate::catalog;
use crate::editor::EDITOR_MAX_WIDTH;
use crate::error::OverprintError;
use crate::geometry::{MonospaceMetrics, Point, Rect, Size, TextMeasure, anchor_left};
use crate::printer::PageProfile;
use crate::printer::config::px_to_mm;
use crate::resolve::{self, DailyCollectionEntry, SettlementRecord};
use crate::template::{Align, FieldPlacement, FontWeight, TemplateConfig};

/// Widest the print preview is ever shown.
pub const PREVIEW_MAX_WIDTH: f64 = 700.0;

/// Where a template is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    Editor,
    Preview,
    Print,
}

/// Unit of a surface's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Mm,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Mm => "mm",
        }
    }
}

/// Where the printed text comes from.
#[derive(Debug, Clone, Copy)]
pub enum Values<'a> {
    /// Catalog sample values, for calibrating without real data.
    Sample,
    /// A real settlement and its daily collections.
    Settlement {
        record: &'a SettlementRecord,
        daily: &'a [DailyCollectionEntry],
    },
}

impl Values<'_> {
    fn text_for(&self, id: &str) -> String {
        match self {
            Values::Sample => catalog::descriptor(id)
                .map(|d| d.sample_value.clone())
                .unwrap_or_default(),
            Values::Settlement { record, daily } => resolve::resolve_id(id, record, daily),
        }
    }
}

/// Background form image as placed on a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundLayer {
    pub data_url: String,
    /// Always 0.0 on print surfaces.
    pub opacity: f64,
}

/// One field's resolved text, positioned on a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedText {
    pub id: String,
    pub text: String,
    /// Calibrated position, percent of the surface.
    pub x: f64,
    pub y: f64,
    /// Calibrated position in surface units.
    pub anchor: Point,
    /// Estimated text box after the alignment shift, in surface units.
    pub bounds: Rect,
    /// CSS pixels.
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub align: Align,
}

/// A fully laid out template, ready to be emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSurface {
    pub target: RenderTarget,
    pub title: String,
    /// `@page` size keyword, print surfaces only.
    pub page: Option<&'static str>,
    pub size: Size,
    pub unit: Unit,
    pub font_family: String,
    pub background: Option<BackgroundLayer>,
    /// Fields with non-empty text, in template order.
    pub items: Vec<PlacedText>,
}

/// Position one field's text on a surface rectangle.
///
/// `unit_per_px` converts the measured pixel width into surface units (1.0
/// for pixel surfaces).
pub fn place_text(
    placement: &FieldPlacement,
    text: String,
    surface: Rect,
    measure: &dyn TextMeasure,
    unit_per_px: f64,
) -> PlacedText {
    let font_px = f64::from(placement.font_size);
    let anchor = surface.from_percent(Point::new(placement.x, placement.y));
    let width = measure.text_width(&text, font_px) * unit_per_px;
    let height = measure.line_height(font_px) * unit_per_px;
    PlacedText {
        id: placement.id.clone(),
        x: placement.x,
        y: placement.y,
        anchor,
        bounds: Rect::new(anchor_left(anchor.x, width, placement.align), anchor.y, width, height),
        font_size: placement.font_size,
        font_weight: placement.font_weight,
        align: placement.align,
        text,
    }
}

/// Builds surfaces for a page profile.
#[derive(Debug, Clone)]
pub struct PrintRenderer<M: TextMeasure = MonospaceMetrics> {
    page: PageProfile,
    measure: M,
}

impl Default for PrintRenderer {
    fn default() -> Self {
        Self::new(PageProfile::default())
    }
}

impl PrintRenderer {
    pub fn new(page: PageProfile) -> Self {
        Self::with_measure(page, MonospaceMetrics::default())
    }
}

impl<M: TextMeasure> PrintRenderer<M> {
    pub fn with_measure(page: PageProfile, measure: M) -> Self {
        Self { page, measure }
    }

    pub fn page(&self) -> PageProfile {
        self.page
    }

    /// Surface size and unit for `target`.
    pub fn surface_size(&self, config: &TemplateConfig, target: RenderTarget) -> (Size, Unit) {
        match target {
            RenderTarget::Editor => (config.template_size.fit_width(EDITOR_MAX_WIDTH), Unit::Px),
            RenderTarget::Preview => (config.template_size.fit_width(PREVIEW_MAX_WIDTH), Unit::Px),
            RenderTarget::Print => (self.page.size_mm(), Unit::Mm),
        }
    }

    /// Lay out a settlement for printing on the physical page.
    ///
    /// Fails with [`OverprintError::NoTemplate`] when the template has no
    /// fields; a blank page is never produced.
    pub fn render(
        &self,
        config: &TemplateConfig,
        settlement: &SettlementRecord,
        daily: &[DailyCollectionEntry],
    ) -> Result<PrintSurface, OverprintError> {
        let values = Values::Settlement {
            record: settlement,
            daily,
        };
        let mut surface = self.render_target(config, values, RenderTarget::Print)?;
        if let Some(book) = settlement.book_number.as_deref().filter(|b| !b.is_empty()) {
            surface.title = format!("Invoice - {}", book);
        }
        Ok(surface)
    }

    /// Lay out on the scaled preview canvas, background visible.
    pub fn render_preview(
        &self,
        config: &TemplateConfig,
        values: Values<'_>,
    ) -> Result<PrintSurface, OverprintError> {
        self.render_target(config, values, RenderTarget::Preview)
    }

    /// Lay out on any target.
    pub fn render_target(
        &self,
        config: &TemplateConfig,
        values: Values<'_>,
        target: RenderTarget,
    ) -> Result<PrintSurface, OverprintError> {
        config.ensure_printable()?;

        let (size, unit) = self.surface_size(config, target);
        let rect = Rect::from_size(size);
        let unit_per_px = match unit {
            Unit::Px => 1.0,
            Unit::Mm => px_to_mm(1.0),
        };

        let items: Vec<PlacedText> = config
            .fields
            .iter()
            .filter_map(|placement| {
                let text = values.text_for(&placement.id);
                if text.is_empty() {
                    return None;
                }
                Some(place_text(placement, text, rect, &self.measure, unit_per_px))
            })
            .collect();

        let background = config.template_image.as_ref().map(|image| BackgroundLayer {
            data_url: image.data_url().to_string(),
            opacity: match target {
                RenderTarget::Print => 0.0,
                RenderTarget::Editor | RenderTarget::Preview => 1.0,
            },
        });

        tracing::debug!(
            surface = ?target,
            placed = config.fields.len(),
            printed = items.len(),
            "template rendered"
        );

        Ok(PrintSurface {
            target,
            title: match target {
                RenderTarget::Print => "Invoice".to_string(),
                RenderTarget::Editor | RenderTarget::Preview => "Template Preview".to_string(),
            },
            page: (target == RenderTarget::Print).then_some(self.page.name),
            size,
            unit,
            font_family: config.global_font_family.clone(),
            background,
            items,
        })
    }
}
