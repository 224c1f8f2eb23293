//! Field samples and curvilinear coordinate grids.
//!
//! A [`Field`] is one 2-D scalar slice extracted at a fixed time step.
//! A [`CoordGrid`] is the pair of longitude/latitude arrays locating each
//! field cell geographically. WRF grids are curvilinear: each node carries
//! its own coordinates, so there is no (dx, dy, origin) shortcut.

use crate::bbox::BoundingBox;
use crate::error::{VizError, VizResult};

/// A 2-D array of f64 values in row-major order.
///
/// Used for coordinate arrays, which need full double precision for
/// projection work.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid2 {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> VizResult<Self> {
        if data.len() != rows * cols {
            return Err(VizError::Dataset(format!(
                "grid data length {} does not match shape {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }
}

/// One 2-D scalar field, row-major, with NaN marking missing samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Field {
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> VizResult<Self> {
        if data.len() != rows * cols {
            return Err(VizError::Dataset(format!(
                "field data length {} does not match shape {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Minimum and maximum over finite samples only.
    ///
    /// Missing (NaN) samples are excluded from the computation, not treated
    /// as zero. Returns `None` when the field has no finite sample at all.
    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for &v in &self.data {
            if !v.is_finite() {
                continue;
            }
            let v = v as f64;
            range = Some(match range {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        range
    }

    /// Apply a pure transform elementwise, preserving NaN samples.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Field {
        let data = self
            .data
            .iter()
            .map(|&v| if v.is_nan() { v } else { f(v as f64) as f32 })
            .collect();
        Field {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

/// Paired longitude/latitude arrays locating each field cell geographically.
///
/// Invariant: both arrays share an identical shape.
#[derive(Debug, Clone)]
pub struct CoordGrid {
    pub lon: Grid2,
    pub lat: Grid2,
}

impl CoordGrid {
    pub fn new(lon: Grid2, lat: Grid2) -> VizResult<Self> {
        if lon.shape() != lat.shape() {
            return Err(VizError::Dataset(format!(
                "longitude grid {:?} and latitude grid {:?} disagree in shape",
                lon.shape(),
                lat.shape()
            )));
        }
        Ok(Self { lon, lat })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.lon.shape()
    }

    /// Whether this grid locates the given field (shapes are equal).
    pub fn matches(&self, field: &Field) -> bool {
        self.shape() == field.shape()
    }

    /// Geographic location of the node at integer indices.
    #[inline]
    pub fn node(&self, row: usize, col: usize) -> (f64, f64) {
        (self.lon.get(row, col), self.lat.get(row, col))
    }

    /// Geographic location of a fractional grid-index position, by bilinear
    /// interpolation between the four surrounding nodes.
    ///
    /// Positions outside the grid are clamped to the border.
    pub fn sample(&self, row: f64, col: f64) -> (f64, f64) {
        let (rows, cols) = self.shape();
        let row = row.clamp(0.0, (rows - 1) as f64);
        let col = col.clamp(0.0, (cols - 1) as f64);

        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(rows - 1);
        let c1 = (c0 + 1).min(cols - 1);
        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let lerp2 = |g: &Grid2| -> f64 {
            let top = g.get(r0, c0) * (1.0 - fc) + g.get(r0, c1) * fc;
            let bottom = g.get(r1, c0) * (1.0 - fc) + g.get(r1, c1) * fc;
            top * (1.0 - fr) + bottom * fr
        };

        (lerp2(&self.lon), lerp2(&self.lat))
    }

    /// Bounding box over all grid nodes.
    pub fn bounds(&self) -> VizResult<BoundingBox> {
        BoundingBox::from_points(
            self.lon
                .values()
                .iter()
                .zip(self.lat.values())
                .map(|(&lon, &lat)| (lon, lat)),
        )
        .ok_or_else(|| VizError::Dataset("coordinate grid has no finite node".to_string()))
    }
}
