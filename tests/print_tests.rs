//! # Print Pipeline Tests
//!
//! End-to-end checks of the calibrate, persist and print path through the
//! public API.
//!
//! ## Test Coverage
//!
//! - **Persistence**: stored templates load back unchanged.
//! - **Calibration**: drops, drags and nudges stay inside the form.
//! - **Layout**: an aligned edge lands on the calibrated point at any surface size.
//! - **Printing**: values resolve per settlement and the background never prints.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use overprint::OverprintError;
use overprint::editor::{Nudge, PlaceOutcome, PlacementEditor, PointerEvent};
use overprint::geometry::{MonospaceMetrics, Point, Rect};
use overprint::render::{PrintRenderer, RenderTarget, Values, html, place_text};
use overprint::resolve::{DailyCollectionEntry, SettlementRecord};
use overprint::template::{
    Align, BackgroundImage, FieldPlacement, FontWeight, JsonFileStore, TemplateConfig,
    TemplateSize, TemplateStore,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A calibrated template for a 1200x1800 scan.
fn calibrated_template() -> TemplateConfig {
    let mut net = FieldPlacement::new("netAmount", 80.0, 90.0);
    net.font_weight = FontWeight::Bold;
    net.align = Align::Right;

    let mut name = FieldPlacement::new("customerName", 20.0, 10.0);
    name.align = Align::Left;

    TemplateConfig {
        template_image: Some(BackgroundImage::from_data_url("data:image/png;base64,AA==")),
        template_size: TemplateSize {
            width: 1200,
            height: 1800,
        },
        fields: vec![
            name,
            net,
            FieldPlacement::new("day01", 10.0, 40.0),
            FieldPlacement::new("day29", 50.0, 60.0),
            FieldPlacement::new("day30", 55.0, 60.0),
        ],
        ..Default::default()
    }
}

fn february_settlement() -> SettlementRecord {
    SettlementRecord {
        book_number: Some("B-17".to_string()),
        customer_name: Some("K. Perera".to_string()),
        year: Some(2024),
        month: Some(2),
        net_amount: Some(-1234.5),
        ..Default::default()
    }
}

fn february_collections() -> Vec<DailyCollectionEntry> {
    vec![
        DailyCollectionEntry::new(date(2024, 2, 1), 10.0, 5.0),
        DailyCollectionEntry::new(date(2024, 2, 29), 12.4, 8.3),
    ]
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("template.json"));

    let config = calibrated_template();
    store.save(&config).unwrap();
    assert_eq!(store.load().unwrap(), Some(config));
}

#[test]
fn test_editor_commit_then_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("template.json"));

    let mut editor = PlacementEditor::new(calibrated_template());
    editor.select(Some("netAmount"));
    editor.nudge_selected(Nudge::Left, true);
    editor.commit(&store).unwrap();

    let reopened = PlacementEditor::open(&store).unwrap();
    assert_eq!(reopened.draft(), editor.draft());
    assert_eq!(reopened.draft().field("netAmount").unwrap().x, 79.0);
}

// ============================================================================
// CALIBRATION
// ============================================================================

#[test]
fn test_positions_stay_inside_form() {
    let canvas = Rect::new(0.0, 0.0, 600.0, 900.0);
    let mut editor = PlacementEditor::new(calibrated_template());

    assert_eq!(
        editor.place("totalKg", Point::new(-40.0, 2000.0), canvas),
        PlaceOutcome::Placed
    );
    let field = editor.draft().field("totalKg").unwrap();
    assert_eq!((field.x, field.y), (0.0, 100.0));

    editor.handle_pointer(
        PointerEvent::Press {
            position: Point::new(480.0, 810.0),
            target: Some("netAmount".to_string()),
        },
        canvas,
    );
    editor.handle_pointer(
        PointerEvent::Move {
            position: Point::new(5000.0, -5000.0),
        },
        canvas,
    );
    editor.handle_pointer(PointerEvent::Release, canvas);
    let net = editor.draft().field("netAmount").unwrap();
    assert_eq!((net.x, net.y), (100.0, 0.0));
    assert!(!editor.is_dragging());
}

#[test]
fn test_field_placed_once() {
    let canvas = Rect::new(0.0, 0.0, 600.0, 900.0);
    let mut editor = PlacementEditor::new(calibrated_template());

    assert_eq!(
        editor.place("totalKg", Point::new(100.0, 100.0), canvas),
        PlaceOutcome::Placed
    );
    assert_eq!(
        editor.place("totalKg", Point::new(300.0, 300.0), canvas),
        PlaceOutcome::AlreadyPlaced
    );

    let count = editor
        .draft()
        .fields
        .iter()
        .filter(|f| f.id == "totalKg")
        .count();
    assert_eq!(count, 1);
    assert!(editor.unused_fields().iter().all(|d| d.id != "totalKg"));
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_right_edge_independent_of_surface_width() {
    let mut placement = FieldPlacement::new("netAmount", 80.0, 50.0);
    placement.align = Align::Right;
    let measure = MonospaceMetrics::default();

    for width in [300.0, 900.0] {
        let surface = Rect::new(0.0, 0.0, width, width * 1.5);
        let placed = place_text(&placement, "15,230.50".to_string(), surface, &measure, 1.0);
        assert!((placed.bounds.right() - width * 0.8).abs() < 1e-9);
        assert!((placed.anchor.x / width - 0.8).abs() < 1e-9);
    }
}

#[test]
fn test_center_independent_of_surface_width() {
    let placement = FieldPlacement::new("customerName", 50.0, 50.0);
    let measure = MonospaceMetrics::default();

    for width in [300.0, 900.0] {
        let surface = Rect::new(0.0, 0.0, width, width);
        let placed = place_text(&placement, "K. Perera".to_string(), surface, &measure, 1.0);
        let mid = placed.bounds.left + placed.bounds.width / 2.0;
        assert!((mid / width - 0.5).abs() < 1e-9);
    }
}

#[test]
fn test_center_straddles_anchor() {
    let placement = FieldPlacement::new("year", 50.0, 50.0);
    let placed = place_text(
        &placement,
        "2024".to_string(),
        Rect::new(0.0, 0.0, 700.0, 1050.0),
        &MonospaceMetrics::default(),
        1.0,
    );
    let mid = placed.bounds.left + placed.bounds.width / 2.0;
    assert!((mid - 350.0).abs() < 1e-9);
}

// ============================================================================
// PRINTING
// ============================================================================

#[test]
fn test_february_day_fields() {
    let renderer = PrintRenderer::default();
    let surface = renderer
        .render(
            &calibrated_template(),
            &february_settlement(),
            &february_collections(),
        )
        .unwrap();

    let text = |id: &str| {
        surface
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.text.as_str())
    };
    assert_eq!(text("day01"), Some("15"));
    assert_eq!(text("day29"), Some("21"));
    // No February 30th: nothing is printed there.
    assert_eq!(text("day30"), None);
}

#[test]
fn test_negative_net_amount() {
    let surface = PrintRenderer::default()
        .render(&calibrated_template(), &february_settlement(), &[])
        .unwrap();
    let net = surface.items.iter().find(|i| i.id == "netAmount").unwrap();
    assert_eq!(net.text, "-1,234.50");
    assert_eq!(net.font_weight, FontWeight::Bold);
}

#[test]
fn test_print_hides_background() {
    let surface = PrintRenderer::default()
        .render(&calibrated_template(), &february_settlement(), &[])
        .unwrap();
    assert_eq!(surface.target, RenderTarget::Print);
    assert_eq!(surface.background.as_ref().unwrap().opacity, 0.0);
    assert_eq!(surface.title, "Invoice - B-17");

    let doc = html::to_html(&surface);
    assert!(doc.contains("style=\"opacity:0\""));
    assert!(doc.contains("-1,234.50"));
}

#[test]
fn test_render_is_repeatable() {
    let renderer = PrintRenderer::default();
    let config = calibrated_template();
    let settlement = february_settlement();
    let daily = february_collections();

    let first = html::to_html(&renderer.render(&config, &settlement, &daily).unwrap());
    let second = html::to_html(&renderer.render(&config, &settlement, &daily).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_no_fields_no_print() {
    let renderer = PrintRenderer::default();
    let empty = TemplateConfig::default();

    let err = renderer
        .render(&empty, &february_settlement(), &[])
        .unwrap_err();
    assert!(matches!(err, OverprintError::NoTemplate));

    let err = renderer.render_preview(&empty, Values::Sample).unwrap_err();
    assert!(matches!(err, OverprintError::NoTemplate));
}

#[test]
fn test_preview_uses_samples() {
    let surface = PrintRenderer::default()
        .render_preview(&calibrated_template(), Values::Sample)
        .unwrap();
    assert_eq!(surface.target, RenderTarget::Preview);
    assert_eq!(surface.size.width, 700.0);
    assert_eq!(surface.background.as_ref().unwrap().opacity, 1.0);
    assert!(surface.items.iter().any(|i| i.id == "customerName"));
}
