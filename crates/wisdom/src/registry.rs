//! Static registry of per-variable rendering metadata.

/// How the display value range for a variable is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalePolicy {
    /// Use the field's own finite min/max at render time.
    Observed,
    /// Clamp to a fixed range in native units.
    Fixed(f64, f64),
}

/// Rendering metadata for one WRF variable.
#[derive(Debug, Clone, Copy)]
pub struct VarWisdom {
    pub name: &'static str,
    /// Unit the variable is stored in.
    pub native_unit: &'static str,
    /// Candidate display units, most preferred first. Every entry must be
    /// reachable from `native_unit` through the conversion table (identity
    /// counts).
    pub colorbar_units: &'static [&'static str],
    /// Color table name understood by the renderer.
    pub colormap: &'static str,
    pub scale: ScalePolicy,
}

static VAR_WISDOM: &[VarWisdom] = &[
    VarWisdom {
        name: "T2",
        native_unit: "K",
        colorbar_units: &["C", "F"],
        colormap: "jet",
        scale: ScalePolicy::Observed,
    },
    VarWisdom {
        name: "PSFC",
        native_unit: "Pa",
        colorbar_units: &["hPa"],
        colormap: "jet",
        scale: ScalePolicy::Observed,
    },
    VarWisdom {
        name: "RH_FIRE",
        native_unit: "-",
        colorbar_units: &["-"],
        colormap: "jet_r",
        scale: ScalePolicy::Fixed(0.0, 1.0),
    },
    VarWisdom {
        name: "F_ROS",
        native_unit: "m/s",
        colorbar_units: &["m/s"],
        colormap: "jet",
        scale: ScalePolicy::Observed,
    },
    VarWisdom {
        name: "F_INT",
        native_unit: "J/m/s^2",
        colorbar_units: &["J/m/s^2"],
        colormap: "jet",
        scale: ScalePolicy::Observed,
    },
    VarWisdom {
        name: "FMC_G",
        native_unit: "-",
        colorbar_units: &["-"],
        colormap: "jet_r",
        scale: ScalePolicy::Fixed(0.0, 0.5),
    },
    VarWisdom {
        name: "FGRNHFX",
        native_unit: "W/m^2",
        colorbar_units: &["W/m^2"],
        colormap: "jet",
        scale: ScalePolicy::Observed,
    },
];

/// Look up rendering wisdom for a variable.
///
/// Absence is a reportable condition, never a default: callers map `None` to
/// a `VariableNotFound` error when wisdom is required.
pub fn lookup(var_name: &str) -> Option<&'static VarWisdom> {
    VAR_WISDOM.iter().find(|w| w.name == var_name)
}

/// Names of all variables for which wisdom is available.
pub fn known_variables() -> Vec<&'static str> {
    VAR_WISDOM.iter().map(|w| w.name).collect()
}
