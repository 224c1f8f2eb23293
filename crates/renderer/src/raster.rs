//! Mercator raster projection of a curvilinear grid.
//!
//! Each grid cell is forward-projected into planar Mercator space and
//! rasterized as a filled quad under the supplied value range and color
//! table. The output drapes over the geographic bounding box as a quad, so
//! the artifact carries its four corner coordinates.

use projection::Mercator;
use tracing::debug;
use viz_common::{CoordGrid, Field, VizError, VizResult};
use wisdom::RenderRange;

use crate::colormap::{Color, ColorTable};
use crate::png;

/// Options for raster projection.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixel count along the longer projected axis; the shorter axis
    /// follows the projected aspect ratio.
    pub long_axis_px: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { long_axis_px: 1024 }
    }
}

/// An encoded raster plus the geographic corners that georeference it.
#[derive(Debug, Clone)]
pub struct RasterArtifact {
    pub png: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// Corner coordinates in the fixed order SW, SE, NE, NW. Consumers map
    /// corners positionally, not by label.
    pub corners: [(f64, f64); 4],
}

/// Project a field through Mercator and rasterize it.
///
/// The value range is used as supplied, never recomputed: out-of-range
/// samples were already clamped upstream. Missing (NaN) cells come out
/// fully transparent.
pub fn project_raster(
    coords: &CoordGrid,
    field: &Field,
    range: &RenderRange,
    table: &ColorTable,
    opts: &RasterOptions,
) -> VizResult<RasterArtifact> {
    if !coords.matches(field) {
        let (rows, cols) = field.shape();
        return Err(VizError::Render(format!(
            "coordinate grid {:?} does not locate the {}x{} field",
            coords.shape(),
            rows,
            cols
        )));
    }

    let bbox = coords.bounds()?;
    // A fresh projection per call: each invocation renders its own extent.
    let proj = Mercator::for_bounds(&bbox);
    let (ext_w, ext_h) = proj.extent();
    if !(ext_w > 0.0 && ext_h > 0.0) {
        return Err(VizError::Render(format!(
            "degenerate projected extent {:.3} x {:.3} m",
            ext_w, ext_h
        )));
    }

    let long_axis = opts.long_axis_px.max(2) as f64;
    let (width, height) = if ext_w >= ext_h {
        (
            long_axis as usize,
            ((long_axis * ext_h / ext_w).round() as usize).max(2),
        )
    } else {
        (
            ((long_axis * ext_w / ext_h).round() as usize).max(2),
            long_axis as usize,
        )
    };

    debug!(
        width,
        height,
        min_lon = bbox.min_lon,
        min_lat = bbox.min_lat,
        max_lon = bbox.max_lon,
        max_lat = bbox.max_lat,
        "projecting raster"
    );

    // Forward-project every node once, in pixel coordinates (row 0 = north).
    let (rows, cols) = coords.shape();
    let sx = width as f64 / ext_w;
    let sy = height as f64 / ext_h;
    let mut nodes = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let (lon, lat) = coords.node(r, c);
            let (x, y) = proj.forward(lon, lat);
            nodes.push((x * sx, (ext_h - y) * sy));
        }
    }

    let mut pixels = vec![0u8; width * height * 4]; // transparent
    let (min_v, max_v) = range.native;
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let v = field.get(r, c);
            if v.is_nan() {
                continue; // missing stays transparent
            }
            let color = table.map(v, min_v, max_v);
            let quad = [
                nodes[r * cols + c],
                nodes[r * cols + c + 1],
                nodes[(r + 1) * cols + c + 1],
                nodes[(r + 1) * cols + c],
            ];
            fill_quad(&mut pixels, width, height, &quad, color);
        }
    }

    let png = png::create_png_auto(&pixels, width, height).map_err(VizError::Render)?;

    Ok(RasterArtifact {
        png,
        width,
        height,
        corners: bbox.corners(),
    })
}

/// Fill a projected quad by scanning its pixel bounding box with a
/// point-in-ring test on pixel centers.
fn fill_quad(pixels: &mut [u8], width: usize, height: usize, quad: &[(f64, f64); 4], color: Color) {
    let min_x = quad.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max_x = quad.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = quad.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_y = quad.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    let x0 = min_x.floor().max(0.0) as usize;
    let x1 = (max_x.ceil() as isize).clamp(0, width as isize) as usize;
    let y0 = min_y.floor().max(0.0) as usize;
    let y1 = (max_y.ceil() as isize).clamp(0, height as isize) as usize;

    for py in y0..y1 {
        for px in x0..x1 {
            let center = (px as f64 + 0.5, py as f64 + 0.5);
            if point_in_ring(center, quad) {
                let idx = (py * width + px) * 4;
                pixels[idx] = color.r;
                pixels[idx + 1] = color.g;
                pixels[idx + 2] = color.b;
                pixels[idx + 3] = color.a;
            }
        }
    }
}

/// Ray-casting point-in-ring test.
fn point_in_ring(point: (f64, f64), ring: &[(f64, f64)]) -> bool {
    let (px, py) = point;
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_ring_square() {
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert!(point_in_ring((5.0, 5.0), &square));
        assert!(!point_in_ring((15.0, 5.0), &square));
        assert!(!point_in_ring((-1.0, -1.0), &square));
    }
}
