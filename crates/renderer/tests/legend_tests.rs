//! Tests for colorbar legend rendering.

use renderer::colormap::ColorTable;
use renderer::legend::{render_legend, Orientation};
use wisdom::RenderRange;

fn celsius_range() -> RenderRange {
    RenderRange {
        native: (263.15, 303.15),
        display: (-10.0, 30.0),
        display_unit: "C".to_string(),
    }
}

fn png_dims(png: &[u8]) -> (u32, u32) {
    (
        u32::from_be_bytes(png[16..20].try_into().unwrap()),
        u32::from_be_bytes(png[20..24].try_into().unwrap()),
    )
}

#[test]
fn test_vertical_legend_dimensions() {
    let table = ColorTable::by_name("jet").unwrap();
    let png = render_legend(&celsius_range(), Orientation::Vertical, 400, &table, "C", "T2")
        .unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    let (w, h) = png_dims(&png);
    assert_eq!(h, 400);
    assert_eq!(w, 200); // short axis is a fixed proportion of the long axis
}

#[test]
fn test_horizontal_legend_dimensions() {
    let table = ColorTable::by_name("jet").unwrap();
    let png = render_legend(
        &celsius_range(),
        Orientation::Horizontal,
        400,
        &table,
        "C",
        "T2",
    )
    .unwrap();

    let (w, h) = png_dims(&png);
    assert_eq!(w, 400);
    assert_eq!(h, 200);
}

#[test]
fn test_legend_is_deterministic() {
    let table = ColorTable::by_name("jet").unwrap();
    let a = render_legend(&celsius_range(), Orientation::Vertical, 300, &table, "C", "T2")
        .unwrap();
    let b = render_legend(&celsius_range(), Orientation::Vertical, 300, &table, "C", "T2")
        .unwrap();
    assert_eq!(a, b, "identical inputs must produce pixel-identical output");
}

#[test]
fn test_reversed_table_changes_output() {
    let jet = ColorTable::by_name("jet").unwrap();
    let jet_r = ColorTable::by_name("jet_r").unwrap();
    let a = render_legend(&celsius_range(), Orientation::Vertical, 300, &jet, "C", "T2").unwrap();
    let b = render_legend(&celsius_range(), Orientation::Vertical, 300, &jet_r, "C", "T2")
        .unwrap();
    assert_ne!(a, b);
}
