//! Render range resolution and clamping.
//!
//! The native-unit range comes either from the field itself (observed
//! policy) or from the registry's fixed bounds; the display-unit range is
//! the converted pair. A conversion miss here means the registry is
//! self-inconsistent and is reported as a fatal configuration error.

use tracing::debug;
use viz_common::{Field, VizError, VizResult};

use crate::registry::{ScalePolicy, VarWisdom};
use crate::units;

/// Resolved value bounds for one render request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRange {
    /// Bounds in the variable's native unit.
    pub native: (f64, f64),
    /// The same bounds converted to the display unit.
    pub display: (f64, f64),
    /// Unit the display bounds are expressed in.
    pub display_unit: String,
}

/// Resolve the render range for a field under the given wisdom.
///
/// The observed range is always computed from the raw field, before any
/// clamping. NaN samples never participate.
pub fn resolve_range(
    field: &Field,
    wisdom: &VarWisdom,
    display_unit: &str,
) -> VizResult<RenderRange> {
    let native = match wisdom.scale {
        ScalePolicy::Observed => field.finite_min_max().ok_or_else(|| {
            VizError::Render(format!(
                "variable '{}' has no finite sample to derive a range from",
                wisdom.name
            ))
        })?,
        ScalePolicy::Fixed(lo, hi) => (lo, hi),
    };

    let unknown = || VizError::UnknownUnitConversion {
        from: wisdom.native_unit.to_string(),
        to: display_unit.to_string(),
    };
    let display = (
        units::convert(native.0, wisdom.native_unit, display_unit).ok_or_else(unknown)?,
        units::convert(native.1, wisdom.native_unit, display_unit).ok_or_else(unknown)?,
    );

    let (display_min, display_max) = display;
    debug!(
        variable = wisdom.name,
        native_min = native.0,
        native_max = native.1,
        display_min,
        display_max,
        unit = display_unit,
        "resolved render range"
    );

    Ok(RenderRange {
        native,
        display,
        display_unit: display_unit.to_string(),
    })
}

/// Replace every out-of-range sample by the nearest bound.
///
/// NaN samples pass through untouched; they stay missing rather than being
/// pulled to a bound.
pub fn clamp_field(field: &Field, range: &RenderRange) -> Field {
    let (lo, hi) = range.native;
    field.map(|v| v.clamp(lo, hi))
}
