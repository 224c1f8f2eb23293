//! Thin wrapper over a WRF NetCDF file.

use std::path::{Path, PathBuf};

use tracing::debug;
use viz_common::{CoordGrid, Field, Grid2, VizError, VizResult};

/// Coordinate grid families a WRF dataset can carry.
///
/// Resolution tries candidates in declaration order; two mesh families is a
/// deliberate design point, revisit before hardcoding a third.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFamily {
    /// Atmospheric mesh.
    Atmosphere,
    /// Embedded fire mesh (refined subgrid).
    Fire,
    /// Mass-point coordinates of geogrid (geo_em) files.
    MassPoint,
}

impl GridFamily {
    /// Candidate (longitude, latitude) variable name pairs, tried in order.
    fn candidates(self) -> &'static [(&'static str, &'static str)] {
        match self {
            GridFamily::Atmosphere => &[("XLONG", "XLAT")],
            GridFamily::Fire => &[("FXLONG", "FXLAT")],
            GridFamily::MassPoint => &[("CLONG", "CLAT"), ("XLONG_M", "XLAT_M")],
        }
    }
}

/// An open WRF output or geogrid dataset.
pub struct WrfDataset {
    file: netcdf::File,
    path: PathBuf,
}

impl WrfDataset {
    /// Open a wrfout / geo_em NetCDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = netcdf::open(&path)
            .map_err(|e| VizError::Dataset(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "opened dataset");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the `Times` character matrix into fixed-width ESMF labels in
    /// storage order.
    pub fn times(&self) -> VizResult<Vec<String>> {
        let var = self
            .file
            .variable("Times")
            .ok_or_else(|| self.missing("Times variable"))?;
        let dims = var.dimensions();
        if dims.len() != 2 {
            return Err(self.missing("2-D Times variable"));
        }
        let strlen = dims[1].len();

        let raw: Vec<u8> = var
            .get_values(..)
            .map_err(|e| VizError::Dataset(format!("failed to read Times: {}", e)))?;

        Ok(raw
            .chunks(strlen)
            .map(|row| {
                String::from_utf8_lossy(row)
                    .trim_end_matches(['\0', ' '])
                    .to_string()
            })
            .collect())
    }

    /// Slice a named variable at a time index, dropping the leading time
    /// axis. Fill values come back as NaN.
    pub fn field_at(&self, name: &str, time_index: usize) -> VizResult<Field> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| self.missing(&format!("variable '{}'", name)))?;
        let dims = var.dimensions();
        if dims.len() != 3 {
            return Err(VizError::Dataset(format!(
                "variable '{}' has {} dimensions, expected (time, south_north, west_east)",
                name,
                dims.len()
            )));
        }
        let rows = dims[1].len();
        let cols = dims[2].len();

        let mut data: Vec<f32> = var
            .get_values((time_index, .., ..))
            .map_err(|e| VizError::Dataset(format!("failed to slice '{}': {}", name, e)))?;

        // WRF marks missing samples with a fill attribute rather than NaN
        let fill = get_f32_attr(&var, "_FillValue").or_else(|| get_f32_attr(&var, "missing_value"));
        if let Some(fill) = fill {
            for v in &mut data {
                if *v == fill {
                    *v = f32::NAN;
                }
            }
        }

        Field::new(rows, cols, data)
    }

    /// Read the static coordinate snapshot for a grid family.
    ///
    /// Index 0 along the leading time axis is the authoritative snapshot;
    /// coordinates without a time axis are read whole.
    pub fn coord_grid(&self, family: GridFamily) -> VizResult<CoordGrid> {
        for (lon_name, lat_name) in family.candidates() {
            let (lon_var, lat_var) =
                match (self.file.variable(lon_name), self.file.variable(lat_name)) {
                    (Some(lon), Some(lat)) => (lon, lat),
                    _ => continue,
                };
            let lon = read_static_2d(&lon_var, lon_name)?;
            let lat = read_static_2d(&lat_var, lat_name)?;
            debug!(family = ?family, lon = lon_name, lat = lat_name, "resolved coordinate grid");
            return CoordGrid::new(lon, lat);
        }
        Err(self.missing(&format!("coordinate grid for {:?}", family)))
    }

    fn missing(&self, what: &str) -> VizError {
        VizError::Dataset(format!("{}: no {}", self.path.display(), what))
    }
}

/// Read a coordinate variable as a 2-D f64 grid, slicing off a leading time
/// axis when present.
fn read_static_2d(var: &netcdf::Variable, name: &str) -> VizResult<Grid2> {
    let dims = var.dimensions();
    let read_err = |e| VizError::Dataset(format!("failed to read '{}': {}", name, e));
    match dims.len() {
        2 => {
            let (rows, cols) = (dims[0].len(), dims[1].len());
            let data: Vec<f64> = var.get_values(..).map_err(read_err)?;
            Grid2::new(rows, cols, data)
        }
        3 => {
            let (rows, cols) = (dims[1].len(), dims[2].len());
            let data: Vec<f64> = var.get_values((0, .., ..)).map_err(read_err)?;
            Grid2::new(rows, cols, data)
        }
        n => Err(VizError::Dataset(format!(
            "coordinate variable '{}' has {} dimensions, expected 2 or 3",
            name, n
        ))),
    }
}

/// Check for an attribute without triggering HDF5 error spam.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}
