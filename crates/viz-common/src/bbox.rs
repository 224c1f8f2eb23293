//! Geographic bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Compute the bounding box of a set of (lon, lat) points.
    ///
    /// Returns `None` when the iterator produces no finite point.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut bbox: Option<BoundingBox> = None;
        for (lon, lat) in points {
            if !lon.is_finite() || !lat.is_finite() {
                continue;
            }
            bbox = Some(match bbox {
                None => BoundingBox::new(lon, lat, lon, lat),
                Some(b) => BoundingBox::new(
                    b.min_lon.min(lon),
                    b.min_lat.min(lat),
                    b.max_lon.max(lon),
                    b.max_lat.max(lat),
                ),
            });
        }
        bbox
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// The four corners in the fixed order SW, SE, NE, NW.
    ///
    /// Consumers (ground overlays, corner sidecars) map corners positionally,
    /// so this order must never change.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_lon, self.min_lat),
            (self.max_lon, self.min_lat),
            (self.max_lon, self.max_lat),
            (self.min_lon, self.max_lat),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_skips_non_finite() {
        let bbox = BoundingBox::from_points(vec![
            (-105.0, 39.5),
            (f64::NAN, 41.0),
            (-104.0, 40.5),
        ])
        .unwrap();
        assert_eq!(bbox.min_lon, -105.0);
        assert_eq!(bbox.max_lon, -104.0);
        assert_eq!(bbox.min_lat, 39.5);
        assert_eq!(bbox.max_lat, 40.5);
    }

    #[test]
    fn test_from_points_empty() {
        assert!(BoundingBox::from_points(Vec::<(f64, f64)>::new()).is_none());
    }

    #[test]
    fn test_corner_order() {
        let bbox = BoundingBox::new(-105.0, 39.0, -104.0, 40.0);
        let corners = bbox.corners();
        assert_eq!(corners[0], (-105.0, 39.0)); // SW
        assert_eq!(corners[1], (-104.0, 39.0)); // SE
        assert_eq!(corners[2], (-104.0, 40.0)); // NE
        assert_eq!(corners[3], (-105.0, 40.0)); // NW
    }
}
