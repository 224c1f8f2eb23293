//! Contour polygon extraction using marching squares.
//!
//! Level sets are traced in grid-index space, linked into rings, then mapped
//! to geographic coordinates through the coordinate grid. Contour vertices
//! generally fall between grid nodes, so the mapping interpolates bilinearly.

use tracing::debug;
use viz_common::{CoordGrid, Field, GeoPolygon};

/// A point in grid-index space (x = column, y = row), possibly fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

/// A line segment between two grid-index points.
#[derive(Debug, Clone)]
struct Segment {
    start: Point,
    end: Point,
}

/// Tolerance for matching segment endpoints, in grid units.
const LINK_EPSILON: f64 = 1e-3;

/// Extract contour polygons for the given levels.
///
/// Each traced curve becomes one independent polygon in discovery order; no
/// deduplication of nested rings is performed. Curves with 3 or fewer
/// vertices are treated as noise and discarded.
pub fn extract_contours(field: &Field, coords: &CoordGrid, levels: &[f64]) -> Vec<GeoPolygon> {
    let mut polygons = Vec::new();
    for &level in levels {
        let segments = march_squares(field, level);
        let rings = link_segments(segments);
        debug!(level, rings = rings.len(), "traced contour level");
        for mut ring in rings {
            // A ring that closed on itself repeats its first point; drop the
            // duplicate before the degeneracy check.
            if ring.len() > 1 && points_match(ring[0], *ring.last().unwrap()) {
                ring.pop();
            }
            if ring.len() <= 3 {
                continue;
            }
            let vertices = ring.iter().map(|p| coords.sample(p.y, p.x)).collect();
            polygons.push(GeoPolygon::new(vertices));
        }
    }
    polygons
}

/// March over every cell, emitting crossing segments for one level.
///
/// A corner is "inside" when its value exceeds the level, so a flat field
/// produces no segments at any level, including its own value.
fn march_squares(field: &Field, level: f64) -> Vec<Segment> {
    let (rows, cols) = field.shape();
    if rows < 2 || cols < 2 {
        return vec![];
    }

    let level = level as f32;
    let mut segments = Vec::new();
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let tl = field.get(r, c);
            let tr = field.get(r, c + 1);
            let bl = field.get(r + 1, c);
            let br = field.get(r + 1, c + 1);

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut cell_index = 0u8;
            if tl > level {
                cell_index |= 1;
            }
            if tr > level {
                cell_index |= 2;
            }
            if br > level {
                cell_index |= 4;
            }
            if bl > level {
                cell_index |= 8;
            }

            segments.extend(cell_segments(
                cell_index, c as f64, r as f64, tl, tr, br, bl, level,
            ));
        }
    }
    segments
}

/// Segments for one marching-squares cell, with interpolated edge crossings.
#[allow(clippy::too_many_arguments)]
fn cell_segments(
    cell_index: u8,
    x: f64,
    y: f64,
    tl: f32,
    tr: f32,
    br: f32,
    bl: f32,
    level: f32,
) -> Vec<Segment> {
    let top = interpolate_edge(x, y, x + 1.0, y, tl, tr, level);
    let right = interpolate_edge(x + 1.0, y, x + 1.0, y + 1.0, tr, br, level);
    let bottom = interpolate_edge(x, y + 1.0, x + 1.0, y + 1.0, bl, br, level);
    let left = interpolate_edge(x, y, x, y + 1.0, tl, bl, level);

    let seg = |a: Point, b: Point| Segment { start: a, end: b };
    match cell_index {
        0 | 15 => vec![],
        1 | 14 => vec![seg(left, top)],
        2 | 13 => vec![seg(top, right)],
        3 | 12 => vec![seg(left, right)],
        4 | 11 => vec![seg(right, bottom)],
        5 => vec![seg(left, top), seg(right, bottom)], // saddle
        6 | 9 => vec![seg(top, bottom)],
        7 | 8 => vec![seg(left, bottom)],
        10 => vec![seg(top, right), seg(left, bottom)], // saddle
        _ => vec![],
    }
}

/// Locate the level crossing along one cell edge by linear interpolation.
fn interpolate_edge(x1: f64, y1: f64, x2: f64, y2: f64, v1: f32, v2: f32, level: f32) -> Point {
    if (v2 - v1).abs() < 1e-6 {
        return Point {
            x: (x1 + x2) / 2.0,
            y: (y1 + y2) / 2.0,
        };
    }
    let t = (((level - v1) / (v2 - v1)) as f64).clamp(0.0, 1.0);
    Point {
        x: x1 + t * (x2 - x1),
        y: y1 + t * (y2 - y1),
    }
}

fn points_match(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < LINK_EPSILON && (a.y - b.y).abs() < LINK_EPSILON
}

/// Link unordered segments into continuous chains by endpoint matching.
///
/// Chains grow from the tail; a segment whose far end touches the chain is
/// appended in whichever direction fits. Output order follows discovery
/// order over the input segments.
fn link_segments(segments: Vec<Segment>) -> Vec<Vec<Point>> {
    let mut chains = Vec::new();
    let mut used = vec![false; segments.len()];

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let mut chain = vec![segments[start_idx].start, segments[start_idx].end];

        let mut extended = true;
        while extended {
            extended = false;
            let tail = *chain.last().unwrap();
            for (i, seg) in segments.iter().enumerate() {
                if used[i] {
                    continue;
                }
                if points_match(seg.start, tail) {
                    chain.push(seg.end);
                } else if points_match(seg.end, tail) {
                    chain.push(seg.start);
                } else {
                    continue;
                }
                used[i] = true;
                extended = true;
                break;
            }
        }
        chains.push(chain);
    }
    chains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_field_has_no_segments() {
        let field = Field::new(3, 3, vec![2.0; 9]).unwrap();
        assert!(march_squares(&field, 2.0).is_empty());
        assert!(march_squares(&field, 0.0).is_empty());
        assert!(march_squares(&field, 5.0).is_empty());
    }

    #[test]
    fn test_single_bump_links_into_one_closed_ring() {
        let mut data = vec![0.0f32; 16];
        data[2 * 4 + 2] = 1.0;
        let field = Field::new(4, 4, data).unwrap();

        let segments = march_squares(&field, 0.0);
        assert_eq!(segments.len(), 4);

        let chains = link_segments(segments);
        assert_eq!(chains.len(), 1);
        assert!(points_match(chains[0][0], *chains[0].last().unwrap()));
    }

    #[test]
    fn test_nan_cells_are_skipped() {
        let mut data = vec![0.0f32; 16];
        data[2 * 4 + 2] = 1.0;
        data[1 * 4 + 1] = f32::NAN;
        let field = Field::new(4, 4, data).unwrap();

        // The NaN corner kills the two cells that touch it around the bump
        let segments = march_squares(&field, 0.0);
        assert!(segments.len() < 4);
    }
}
