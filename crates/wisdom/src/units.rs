//! Unit conversion table.
//!
//! Transforms are keyed by the ordered (from, to) pair and are pure
//! functions, so they apply equally to a scalar or elementwise to a field.
//! An unregistered pair yields `None` rather than an error: the caller
//! decides whether absence is fatal.

use viz_common::Field;

type Transform = fn(f64) -> f64;

/// Look up the transform for an ordered unit pair.
fn transform_for(from: &str, to: &str) -> Option<Transform> {
    match (from, to) {
        ("K", "C") => Some(|x| x - 273.15),
        ("C", "K") => Some(|x| x + 273.15),
        ("K", "F") => Some(|x| 9.0 / 5.0 * (x - 273.15) + 32.0),
        ("F", "K") => Some(|x| (x - 32.0) * 5.0 / 9.0 + 273.15),
        ("Pa", "hPa") => Some(|x| x / 100.0),
        ("hPa", "Pa") => Some(|x| x * 100.0),
        _ => None,
    }
}

/// Convert a scalar value between units.
///
/// Equal units are always the identity, whether or not the pair is
/// registered. Unknown pairs return `None`.
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    transform_for(from, to).map(|f| f(value))
}

/// Convert a whole field between units, preserving NaN samples.
pub fn convert_field(field: &Field, from: &str, to: &str) -> Option<Field> {
    if from == to {
        return Some(field.clone());
    }
    transform_for(from, to).map(|f| field.map(f))
}
