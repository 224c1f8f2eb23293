//! WRF NetCDF dataset access and field/grid extraction.
//!
//! A wrfout file multiplexes two physical grids: the atmospheric mesh
//! (`XLONG`/`XLAT`) and a higher-resolution embedded fire mesh
//! (`FXLONG`/`FXLAT`). A variable's native grid is not explicit in its
//! name, so extraction resolves the grid by shape.

pub mod dataset;
pub mod extract;

pub use dataset::{GridFamily, WrfDataset};
pub use extract::extract;
