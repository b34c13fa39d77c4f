//! # Placement Editor
//!
//! Interactive calibration of field positions over the uploaded form image.
//!
//! The editor works on a *draft* copy of the template. Nothing reaches the
//! [`TemplateStore`] until [`PlacementEditor::commit`] is called, and a failed
//! commit leaves the draft untouched.
//!
//! ## Canvas Coordinates
//!
//! Pointer positions are absolute pixels. Every conversion to or from the
//! stored percentages goes through the canvas rectangle *as currently
//! rendered* (its on-screen bounding box), never the image's intrinsic size.
//!
//! ## Example
//!
//! ```
//! use overprint::editor::{PlaceOutcome, PlacementEditor, PointerEvent};
//! use overprint::geometry::{Point, Rect};
//! use overprint::template::TemplateConfig;
//!
//! let mut editor = PlacementEditor::new(TemplateConfig::default());
//! let canvas = Rect::new(0.0, 0.0, 600.0, 750.0);
//!
//! let outcome = editor.place("netAmount", Point::new(480.0, 675.0), canvas);
//! assert_eq!(outcome, PlaceOutcome::Placed);
//!
//! editor.handle_pointer(
//!     PointerEvent::Press { position: Point::new(480.0, 675.0), target: Some("netAmount".into()) },
//!     canvas,
//! );
//! editor.handle_pointer(PointerEvent::Move { position: Point::new(540.0, 675.0) }, canvas);
//! editor.handle_pointer(PointerEvent::Release, canvas);
//!
//! assert_eq!(editor.draft().field("netAmount").unwrap().x, 90.0);
//! ```

mod drag;

pub use drag::{DragState, PointerEvent};

use crate::catalog::{self, FieldDescriptor, FieldRef};
use crate::error::OverprintError;
use crate::geometry::{Point, Rect, Size, TextMeasure, anchor_left, clamp_percent, clamp_point};
use crate::template::{
    Align, BackgroundImage, FieldPlacement, FontWeight, TemplateConfig, TemplateSize,
    TemplateStore, clamp_font_size,
};

/// Widest the editor canvas is ever shown.
pub const EDITOR_MAX_WIDTH: f64 = 600.0;

/// Keyboard nudge step, in percent.
pub const NUDGE_FINE: f64 = 0.2;

/// Keyboard nudge step with the coarse modifier held, in percent.
pub const NUDGE_COARSE: f64 = 1.0;

/// Result of dropping a catalog field on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed,
    /// The field is already on the template; nothing changed.
    AlreadyPlaced,
    /// The id is not in the field catalog; nothing changed.
    UnknownField,
}

/// A change to the selected field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleEdit {
    FontSize(u32),
    FontWeight(FontWeight),
    Align(Align),
    X(f64),
    Y(f64),
}

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Up,
    Down,
    Left,
    Right,
}

/// A placed field as drawn on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub id: String,
    /// Label in design mode, sample value in preview mode.
    pub text: String,
    /// Calibrated point, absolute pixels.
    pub anchor: Point,
    /// Text box after the alignment shift, absolute pixels.
    pub bounds: Rect,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub align: Align,
    pub selected: bool,
}

/// Editor session over a draft template.
#[derive(Debug, Clone)]
pub struct PlacementEditor {
    draft: TemplateConfig,
    selected: Option<String>,
    drag: DragState,
    preview: bool,
}

impl PlacementEditor {
    pub fn new(draft: TemplateConfig) -> Self {
        Self {
            draft,
            selected: None,
            drag: DragState::Idle,
            preview: false,
        }
    }

    /// Start a session from the stored template, or an empty draft.
    pub fn open(store: &dyn TemplateStore) -> Result<Self, OverprintError> {
        Ok(Self::new(store.load()?.unwrap_or_default()))
    }

    pub fn draft(&self) -> &TemplateConfig {
        &self.draft
    }

    pub fn into_draft(self) -> TemplateConfig {
        self.draft
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_field(&self) -> Option<&FieldPlacement> {
        self.selected.as_deref().and_then(|id| self.draft.field(id))
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    /// Toggle between labels and sample values. Display only.
    pub fn toggle_preview(&mut self) {
        self.preview = !self.preview;
    }

    /// Size the canvas is shown at in the editor.
    pub fn canvas_size(&self) -> Size {
        self.draft.template_size.fit_width(EDITOR_MAX_WIDTH)
    }

    /// Replace the background with an uploaded image.
    ///
    /// Placements are kept; they are percentages and survive a change of
    /// image resolution.
    pub fn set_background(&mut self, bytes: &[u8]) -> Result<TemplateSize, OverprintError> {
        let (image, size) = BackgroundImage::from_bytes(bytes)?;
        self.draft.template_image = Some(image);
        self.draft.template_size = size;
        tracing::debug!(width = size.width, height = size.height, "background replaced");
        Ok(size)
    }

    /// Catalog entries not yet on the template. Only these can be dragged in.
    pub fn unused_fields(&self) -> Vec<&'static FieldDescriptor> {
        catalog::catalog()
            .iter()
            .filter(|d| !self.draft.contains(&d.id))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------------

    /// Drop catalog field `id` at pointer `position` on `canvas`.
    pub fn place(&mut self, id: &str, position: Point, canvas: Rect) -> PlaceOutcome {
        if FieldRef::parse(id).is_none() {
            tracing::warn!(field = id, "refusing to place unknown field");
            return PlaceOutcome::UnknownField;
        }
        if self.draft.contains(id) {
            tracing::warn!(field = id, "field already placed on template");
            return PlaceOutcome::AlreadyPlaced;
        }

        let pct = canvas
            .to_percent(position)
            .map(clamp_point)
            .unwrap_or_default();
        self.draft.fields.push(FieldPlacement::new(id, pct.x, pct.y));
        tracing::debug!(field = id, x = pct.x, y = pct.y, "field placed");
        PlaceOutcome::Placed
    }

    /// Select a placed field, or clear the selection with `None`.
    ///
    /// Selecting an id that is not placed clears the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.draft.contains(id))
            .map(str::to_string);
    }

    /// Feed one pointer event. Returns true if a placement moved.
    pub fn handle_pointer(&mut self, event: PointerEvent, canvas: Rect) -> bool {
        match event {
            PointerEvent::Press { position, target } => {
                let Some(field) = target.as_deref().and_then(|id| self.draft.field(id)) else {
                    self.selected = None;
                    self.drag = DragState::Idle;
                    return false;
                };
                let anchor = canvas.from_percent(Point::new(field.x, field.y));
                let id = field.id.clone();
                self.selected = Some(id.clone());
                self.drag = DragState::Dragging {
                    field: id,
                    offset: position - anchor,
                };
                false
            }
            PointerEvent::Move { position } => {
                let DragState::Dragging { field, offset } = &self.drag else {
                    return false;
                };
                let Some(pct) = canvas.to_percent(position - *offset) else {
                    return false;
                };
                let pct = clamp_point(pct);
                match self.draft.field_mut(field) {
                    Some(placement) => {
                        placement.x = pct.x;
                        placement.y = pct.y;
                        true
                    }
                    None => false,
                }
            }
            PointerEvent::Release => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// Press at `position`, targeting whatever field is drawn there.
    pub fn press_at(&mut self, position: Point, canvas: Rect, measure: &dyn TextMeasure) -> bool {
        let target = self
            .hit_test(position, canvas, measure)
            .map(str::to_string);
        self.handle_pointer(PointerEvent::Press { position, target }, canvas)
    }

    // ------------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------------

    /// Apply an edit to the selected field. Returns false if nothing is
    /// selected.
    pub fn edit_selected(&mut self, edit: StyleEdit) -> bool {
        let Some(field) = self.selected.as_deref().and_then(|id| self.draft.field_mut(id)) else {
            return false;
        };
        match edit {
            StyleEdit::FontSize(size) => field.font_size = clamp_font_size(size),
            StyleEdit::FontWeight(weight) => field.font_weight = weight,
            StyleEdit::Align(align) => field.align = align,
            StyleEdit::X(x) => field.x = clamp_percent(x),
            StyleEdit::Y(y) => field.y = clamp_percent(y),
        }
        true
    }

    /// Move the selected field one keyboard step.
    pub fn nudge_selected(&mut self, direction: Nudge, coarse: bool) -> bool {
        let step = if coarse { NUDGE_COARSE } else { NUDGE_FINE };
        let Some(field) = self.selected.as_deref().and_then(|id| self.draft.field_mut(id)) else {
            return false;
        };
        let (dx, dy) = match direction {
            Nudge::Up => (0.0, -step),
            Nudge::Down => (0.0, step),
            Nudge::Left => (-step, 0.0),
            Nudge::Right => (step, 0.0),
        };
        field.x = clamp_percent(field.x + dx);
        field.y = clamp_percent(field.y + dy);
        true
    }

    /// Remove a placement. Clears the selection if it pointed at `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.draft.fields.len();
        self.draft.fields.retain(|f| f.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.drag.field() == Some(id) {
            self.drag = DragState::Idle;
        }
        self.draft.fields.len() != before
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.remove(&id),
            None => false,
        }
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.draft.global_font_family = family.into();
    }

    /// Set the global font size and apply it to every placed field.
    pub fn apply_global_font_size(&mut self, size: u32) {
        let size = clamp_font_size(size);
        self.draft.global_font_size = size;
        for field in &mut self.draft.fields {
            field.font_size = size;
        }
    }

    // ------------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------------

    /// Lay out every placed field on `canvas`.
    pub fn layout(&self, canvas: Rect, measure: &dyn TextMeasure) -> Vec<FieldView> {
        self.draft
            .fields
            .iter()
            .map(|field| {
                let text = self.display_text(&field.id);
                let font_size = f64::from(field.font_size);
                let anchor = canvas.from_percent(Point::new(field.x, field.y));
                let width = measure.text_width(&text, font_size);
                let bounds = Rect::new(
                    anchor_left(anchor.x, width, field.align),
                    anchor.y,
                    width,
                    measure.line_height(font_size),
                );
                FieldView {
                    id: field.id.clone(),
                    text,
                    anchor,
                    bounds,
                    font_size: field.font_size,
                    font_weight: field.font_weight,
                    align: field.align,
                    selected: self.selected.as_deref() == Some(field.id.as_str()),
                }
            })
            .collect()
    }

    /// Topmost placed field drawn under `point`.
    pub fn hit_test(&self, point: Point, canvas: Rect, measure: &dyn TextMeasure) -> Option<&str> {
        let views = self.layout(canvas, measure);
        let hit = views.iter().rev().find(|v| v.bounds.contains(point))?;
        self.draft.field(&hit.id).map(|f| f.id.as_str())
    }

    fn display_text(&self, id: &str) -> String {
        match (catalog::descriptor(id), self.preview) {
            (Some(d), true) => d.sample_value.clone(),
            (Some(d), false) => d.label.clone(),
            (None, true) => String::new(),
            (None, false) => id.to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Save the draft as the active template.
    ///
    /// Refused until a background image has been uploaded. On a storage
    /// error the draft is left as it was.
    pub fn commit(&self, store: &dyn TemplateStore) -> Result<(), OverprintError> {
        if self.draft.template_image.is_none() {
            return Err(OverprintError::Config(
                "Upload a template image before saving".to_string(),
            ));
        }
        store.save(&self.draft)
    }

    /// Erase the stored template and empty the draft.
    pub fn clear(&mut self, store: &dyn TemplateStore) -> Result<(), OverprintError> {
        store.clear()?;
        self.draft.template_image = None;
        self.draft.fields.clear();
        self.selected = None;
        self.drag = DragState::Idle;
        Ok(())
    }
}
