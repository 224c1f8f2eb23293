//! Image rendering for simulation output visualization.
//!
//! Implements the raster products:
//! - Color tables (jet family) with explicit missing-value handling
//! - Mercator raster projection of curvilinear grids
//! - Colorbar legends
//! - PNG encoding

pub mod colormap;
pub mod legend;
pub mod png;
pub mod raster;

pub use colormap::{Color, ColorTable};
pub use legend::{render_legend, Orientation};
pub use raster::{project_raster, RasterArtifact, RasterOptions};
