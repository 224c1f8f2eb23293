//! Tests for the domain boundary builder.

use vector::build_boundary;
use viz_common::{CoordGrid, Grid2};

fn grid(rows: usize, cols: usize) -> CoordGrid {
    let mut lon = Vec::with_capacity(rows * cols);
    let mut lat = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            lon.push(c as f64);
            lat.push(r as f64);
        }
    }
    CoordGrid::new(
        Grid2::new(rows, cols, lon).unwrap(),
        Grid2::new(rows, cols, lat).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_vertex_count_is_2r_plus_2c_minus_4() {
    for (rows, cols) in [(2, 2), (2, 5), (4, 3), (7, 7), (10, 4)] {
        let ring = build_boundary(&grid(rows, cols)).unwrap();
        assert_eq!(
            ring.len(),
            2 * rows + 2 * cols - 4,
            "vertex count for {}x{}",
            rows,
            cols
        );
    }
}

#[test]
fn test_only_border_nodes_and_all_of_them() {
    let (rows, cols) = (5, 6);
    let ring = build_boundary(&grid(rows, cols)).unwrap();

    for &(lon, lat) in ring.vertices() {
        let (c, r) = (lon as usize, lat as usize);
        let on_border = r == 0 || r == rows - 1 || c == 0 || c == cols - 1;
        assert!(on_border, "interior node ({}, {}) in boundary", r, c);
    }

    // No node repeats
    let mut seen = std::collections::HashSet::new();
    for &(lon, lat) in ring.vertices() {
        assert!(seen.insert((lon as i64, lat as i64)), "duplicate vertex");
    }
}

#[test]
fn test_traversal_order_and_adjacency() {
    let ring = build_boundary(&grid(3, 4)).unwrap();
    let verts = ring.vertices();

    // Starts at (row 0, col 0) and walks the top row first
    assert_eq!(verts[0], (0.0, 0.0));
    assert_eq!(verts[1], (1.0, 0.0));
    assert_eq!(verts[3], (3.0, 0.0)); // top-right corner
    assert_eq!(verts[4], (3.0, 1.0)); // down the right column

    // Consecutive vertices (and the closing pair) are grid-adjacent
    let n = verts.len();
    for i in 0..n {
        let (ax, ay) = verts[i];
        let (bx, by) = verts[(i + 1) % n];
        let d = (ax - bx).abs() + (ay - by).abs();
        assert!((d - 1.0).abs() < 1e-12, "vertices {} and {} not adjacent", i, (i + 1) % n);
    }
}

#[test]
fn test_too_small_grid_is_rejected() {
    assert!(build_boundary(&grid(1, 5)).is_err());
}
