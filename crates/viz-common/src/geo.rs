//! Geographic polygon rings.

use serde::{Deserialize, Serialize};

/// An ordered ring of (longitude, latitude) vertices.
///
/// The ring is stored open: the first vertex is not repeated at the end.
/// Writers that need an explicitly closed ring use [`GeoPolygon::closed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPolygon {
    vertices: Vec<(f64, f64)>,
}

impl GeoPolygon {
    pub fn new(vertices: Vec<(f64, f64)>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A ring with 3 or fewer vertices encloses no area worth emitting.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() <= 3
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// The ring with the first vertex repeated at the end.
    pub fn closed(&self) -> Vec<(f64, f64)> {
        let mut ring = self.vertices.clone();
        if let Some(&first) = ring.first() {
            if ring.last() != Some(&first) {
                ring.push(first);
            }
        }
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate() {
        assert!(GeoPolygon::new(vec![]).is_degenerate());
        assert!(GeoPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).is_degenerate());
        assert!(
            !GeoPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).is_degenerate()
        );
    }

    #[test]
    fn test_closed_repeats_first_vertex_once() {
        let poly = GeoPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let ring = poly.closed();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);

        // Closing an already-closed ring must not duplicate again.
        let again = GeoPolygon::new(ring.clone()).closed();
        assert_eq!(again.len(), 5);
    }
}
