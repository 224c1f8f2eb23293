//! Domain boundary rings.

use viz_common::{CoordGrid, GeoPolygon, VizError, VizResult};

/// Walk the four border edges of a grid into one closed boundary ring.
///
/// Traversal order is load-bearing: top row left to right, right column top
/// to bottom, bottom row right to left, left column bottom to top. This
/// winding determines the ring's interior for downstream fill rendering, so
/// it must not be reversed. Each border node appears exactly once; an R x C
/// grid yields 2R + 2C - 4 vertices and the writer closes the ring.
pub fn build_boundary(coords: &CoordGrid) -> VizResult<GeoPolygon> {
    let (rows, cols) = coords.shape();
    if rows < 2 || cols < 2 {
        return Err(VizError::Render(format!(
            "domain boundary needs at least a 2x2 grid, got {}x{}",
            rows, cols
        )));
    }

    let mut ring = Vec::with_capacity(2 * rows + 2 * cols - 4);
    for c in 0..cols {
        ring.push(coords.node(0, c));
    }
    for r in 1..rows {
        ring.push(coords.node(r, cols - 1));
    }
    for c in (0..cols - 1).rev() {
        ring.push(coords.node(rows - 1, c));
    }
    for r in (1..rows - 1).rev() {
        ring.push(coords.node(r, 0));
    }

    Ok(GeoPolygon::new(ring))
}
