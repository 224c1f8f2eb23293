//! Common types and utilities shared across all wrf2kml crates.

pub mod bbox;
pub mod error;
pub mod geo;
pub mod grid;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{VizError, VizResult};
pub use geo::GeoPolygon;
pub use grid::{CoordGrid, Field, Grid2};
pub use time::EsmfTime;
