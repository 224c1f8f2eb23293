//! Vector products: contour polygons and domain boundary rings.

pub mod boundary;
pub mod contour;

pub use boundary::build_boundary;
pub use contour::extract_contours;
