//! Field and coordinate-grid extraction at a requested time step.

use tracing::info;
use viz_common::{time, CoordGrid, Field, VizError, VizResult};

use crate::dataset::{GridFamily, WrfDataset};

/// Extract a variable at an exact time label together with its matching
/// coordinate grid.
///
/// The time label must match a decoded `Times` entry exactly; there is no
/// nearest-time fallback. Grid resolution tries the atmospheric mesh first
/// and falls back to the fire mesh when the shapes disagree. When neither
/// family matches, the failure is a distinct [`VizError::ShapeMismatch`],
/// not a missing variable.
pub fn extract(
    dataset: &WrfDataset,
    variable: &str,
    time_label: &str,
) -> VizResult<(Field, CoordGrid)> {
    let times = dataset.times()?;
    let tindex = time::find_label(&times, time_label)
        .ok_or_else(|| VizError::TimeNotFound(time_label.to_string()))?;

    let field = dataset.field_at(variable, tindex)?;
    let (rows, cols) = field.shape();

    for family in [GridFamily::Atmosphere, GridFamily::Fire] {
        let grid = match dataset.coord_grid(family) {
            Ok(grid) => grid,
            Err(_) => continue, // family not present in this dataset
        };
        if grid.matches(&field) {
            info!(
                variable,
                time = time_label,
                time_index = tindex,
                family = ?family,
                rows,
                cols,
                "extracted field"
            );
            return Ok((field, grid));
        }
    }

    Err(VizError::ShapeMismatch {
        variable: variable.to_string(),
        rows,
        cols,
    })
}
