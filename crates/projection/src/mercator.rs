//! Spherical Mercator projection anchored to a data bounding box.
//!
//! Raster products drape a flat image over the globe, so each render builds
//! a projection from its own data extent: the origin sits at the SW corner
//! of the bounding box and planar coordinates grow east (x) and north (y).
//! The true-scale parallel is fixed at a reference latitude for the
//! continental-US fire domains this toolchain targets.

use std::f64::consts::PI;

use viz_common::BoundingBox;

/// Sphere radius in meters.
const EARTH_RADIUS: f64 = 6_370_997.0;

/// Latitude of true scale for all raster products, degrees.
pub const TRUE_SCALE_LAT: f64 = 40.0;

/// Spherical Mercator projection with its origin at a bounding box's SW
/// corner.
///
/// Constructed fresh from the data's own bounding box on every call; there
/// is no shared or cached projection state, because different invocations
/// render different sub-domains with different extents.
#[derive(Debug, Clone)]
pub struct Mercator {
    /// Longitude of the planar origin, radians.
    lon0: f64,
    /// Mercator ordinate of the planar origin.
    y0: f64,
    /// Scale factor cos(true-scale latitude) applied to both axes.
    k0: f64,
    /// Planar extent (width, height) in meters.
    extent: (f64, f64),
}

impl Mercator {
    /// Build a projection covering the given geographic bounding box with
    /// the default true-scale parallel.
    pub fn for_bounds(bbox: &BoundingBox) -> Self {
        Self::with_true_scale(bbox, TRUE_SCALE_LAT)
    }

    /// Build a projection covering the bounding box with an explicit
    /// true-scale parallel in degrees.
    pub fn with_true_scale(bbox: &BoundingBox, lat_ts_deg: f64) -> Self {
        let k0 = lat_ts_deg.to_radians().cos();
        let lon0 = bbox.min_lon.to_radians();
        let y0 = EARTH_RADIUS * k0 * psi(bbox.min_lat.to_radians());

        let mut proj = Self {
            lon0,
            y0,
            k0,
            extent: (0.0, 0.0),
        };
        proj.extent = proj.forward(bbox.max_lon, bbox.max_lat);
        proj
    }

    /// Project geographic coordinates (degrees) to planar meters.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let x = EARTH_RADIUS * self.k0 * (lon_deg.to_radians() - self.lon0);
        let y = EARTH_RADIUS * self.k0 * psi(lat_deg.to_radians()) - self.y0;
        (x, y)
    }

    /// Invert planar meters back to geographic coordinates (degrees).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = self.lon0 + x / (EARTH_RADIUS * self.k0);
        let psi = (y + self.y0) / (EARTH_RADIUS * self.k0);
        let lat = 2.0 * psi.exp().atan() - PI / 2.0;
        (lon.to_degrees(), lat.to_degrees())
    }

    /// Planar (width, height) of the projected bounding box in meters.
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }
}

/// Mercator latitude function ln(tan(pi/4 + lat/2)).
fn psi(lat_rad: f64) -> f64 {
    (PI / 4.0 + lat_rad / 2.0).tan().ln()
}
