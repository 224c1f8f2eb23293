//! Tests for Mercator raster projection.

use renderer::colormap::ColorTable;
use renderer::raster::{project_raster, RasterOptions};
use viz_common::{CoordGrid, Field, Grid2};
use wisdom::RenderRange;

fn grid(rows: usize, cols: usize, north_up: bool) -> CoordGrid {
    let mut lon = Vec::with_capacity(rows * cols);
    let mut lat = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            lon.push(-105.0 + c as f64 * 0.05);
            let lat_step = r as f64 * 0.05;
            lat.push(if north_up {
                40.0 - lat_step
            } else {
                40.0 - (rows - 1) as f64 * 0.05 + lat_step
            });
        }
    }
    CoordGrid::new(
        Grid2::new(rows, cols, lon).unwrap(),
        Grid2::new(rows, cols, lat).unwrap(),
    )
    .unwrap()
}

fn unit_range() -> RenderRange {
    RenderRange {
        native: (0.0, 1.0),
        display: (0.0, 1.0),
        display_unit: "-".to_string(),
    }
}

fn ramp_field(rows: usize, cols: usize) -> Field {
    let data = (0..rows * cols)
        .map(|i| i as f32 / (rows * cols - 1) as f32)
        .collect();
    Field::new(rows, cols, data).unwrap()
}

// ============================================================================
// corner georeferencing
// ============================================================================

#[test]
fn test_corners_in_sw_se_ne_nw_order() {
    let coords = grid(8, 10, false);
    let field = ramp_field(8, 10);
    let table = ColorTable::by_name("jet").unwrap();

    let artifact =
        project_raster(&coords, &field, &unit_range(), &table, &RasterOptions::default()).unwrap();

    let [sw, se, ne, nw] = artifact.corners;
    assert!(sw.0 < se.0 && sw.1 == se.1, "SW/SE share min_lat");
    assert!(ne.1 > se.1 && ne.0 == se.0, "SE/NE share max_lon");
    assert!(nw.0 < ne.0 && nw.1 == ne.1, "NE/NW share max_lat");
    assert!((sw.0 - -105.0).abs() < 1e-9);
}

#[test]
fn test_corner_order_independent_of_row_direction() {
    // North-up and south-up grids cover the same bbox, so the corner list
    // must be identical either way.
    let field = ramp_field(6, 6);
    let table = ColorTable::by_name("jet").unwrap();
    let opts = RasterOptions::default();

    let a = project_raster(&grid(6, 6, true), &field, &unit_range(), &table, &opts).unwrap();
    let b = project_raster(&grid(6, 6, false), &field, &unit_range(), &table, &opts).unwrap();
    assert_eq!(a.corners, b.corners);
}

#[test]
fn test_determinism() {
    let coords = grid(6, 9, false);
    let field = ramp_field(6, 9);
    let table = ColorTable::by_name("jet").unwrap();
    let opts = RasterOptions { long_axis_px: 256 };

    let a = project_raster(&coords, &field, &unit_range(), &table, &opts).unwrap();
    let b = project_raster(&coords, &field, &unit_range(), &table, &opts).unwrap();
    assert_eq!(a.corners, b.corners);
    assert_eq!(a.png, b.png, "identical inputs must give identical bytes");
}

// ============================================================================
// pixel output
// ============================================================================

#[test]
fn test_png_signature_and_dimensions() {
    let coords = grid(5, 5, false);
    let field = ramp_field(5, 5);
    let table = ColorTable::by_name("jet").unwrap();
    let opts = RasterOptions { long_axis_px: 128 };

    let artifact = project_raster(&coords, &field, &unit_range(), &table, &opts).unwrap();
    assert_eq!(&artifact.png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR dimensions live at fixed offsets right after the signature
    let w = u32::from_be_bytes(artifact.png[16..20].try_into().unwrap()) as usize;
    let h = u32::from_be_bytes(artifact.png[20..24].try_into().unwrap()) as usize;
    assert_eq!(w, artifact.width);
    assert_eq!(h, artifact.height);
    assert_eq!(w.max(h), 128);
}

#[test]
fn test_shape_mismatch_rejected() {
    let coords = grid(5, 5, false);
    let field = ramp_field(4, 4);
    let table = ColorTable::by_name("jet").unwrap();

    let err = project_raster(&coords, &field, &unit_range(), &table, &RasterOptions::default());
    assert!(err.is_err());
}

#[test]
fn test_all_nan_field_renders_fully_transparent() {
    let coords = grid(4, 4, false);
    let field = Field::new(4, 4, vec![f32::NAN; 16]).unwrap();
    let table = ColorTable::by_name("jet").unwrap();
    let opts = RasterOptions { long_axis_px: 64 };

    let artifact = project_raster(&coords, &field, &unit_range(), &table, &opts).unwrap();
    // Indexed PNG of a fully transparent image needs a tRNS chunk
    assert!(artifact.png.windows(4).any(|w| w == b"tRNS"));
}
