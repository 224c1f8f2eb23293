//! ESMF timestamp handling for WRF output.
//!
//! WRF stores its time axis as a character matrix of fixed-width labels in
//! the form `2020-01-01_00:00:00`. Time selection is an exact string match
//! against these labels, never a nearest-time lookup.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format of a WRF ESMF timestamp label.
pub const ESMF_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// A parsed ESMF timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EsmfTime(pub NaiveDateTime);

impl EsmfTime {
    /// Parse a fixed-width ESMF label.
    pub fn parse(label: &str) -> Result<Self, TimeParseError> {
        NaiveDateTime::parse_from_str(label, ESMF_FORMAT)
            .map(EsmfTime)
            .map_err(|_| TimeParseError::InvalidFormat(label.to_string()))
    }

    /// Render back to the canonical fixed-width label.
    pub fn label(&self) -> String {
        self.0.format(ESMF_FORMAT).to_string()
    }
}

impl std::fmt::Display for EsmfTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Find the position of an exact label within a decoded time axis.
pub fn find_label(labels: &[String], wanted: &str) -> Option<usize> {
    labels.iter().position(|l| l == wanted)
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("invalid ESMF timestamp: {0}")]
    InvalidFormat(String),
}
