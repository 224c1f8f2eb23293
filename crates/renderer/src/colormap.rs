//! Color tables for value-to-color mapping.
//!
//! A [`ColorTable`] is a plain value passed explicitly through the
//! pipeline. The missing-value color travels with the table instead of
//! living in shared colormap state, so concurrent renders cannot interfere
//! with each other.

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Number of entries in a color ramp.
const RAMP_LEN: usize = 256;

/// A named color ramp plus the color used for missing samples.
#[derive(Debug, Clone)]
pub struct ColorTable {
    name: String,
    ramp: Vec<Color>,
    missing: Color,
}

impl ColorTable {
    /// Look up a table by name. A `_r` suffix reverses the base table.
    pub fn by_name(name: &str) -> Option<ColorTable> {
        if let Some(base) = name.strip_suffix("_r") {
            return ColorTable::by_name(base).map(|t| t.reversed(name));
        }
        match name {
            "jet" => Some(jet()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color assigned to missing (NaN) samples.
    pub fn missing(&self) -> Color {
        self.missing
    }

    /// Sample the ramp at a normalized position, clamped to [0, 1].
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let idx = (t * (RAMP_LEN - 1) as f64).round() as usize;
        self.ramp[idx]
    }

    /// Map a data value onto the ramp given the value range.
    ///
    /// NaN maps to the missing color. A degenerate range maps everything to
    /// the ramp midpoint.
    pub fn map(&self, value: f32, min: f64, max: f64) -> Color {
        if value.is_nan() {
            return self.missing;
        }
        let span = max - min;
        if span.abs() < 1e-12 {
            return self.sample(0.5);
        }
        self.sample((value as f64 - min) / span)
    }

    fn reversed(&self, name: &str) -> ColorTable {
        let mut ramp = self.ramp.clone();
        ramp.reverse();
        ColorTable {
            name: name.to_string(),
            ramp,
            missing: self.missing,
        }
    }

    /// Evenly spaced ramp colors, oldest-to-newest, for gradient stops.
    pub fn gradient_stops(&self, count: usize) -> Vec<(f64, Color)> {
        let count = count.max(2);
        (0..count)
            .map(|i| {
                let t = i as f64 / (count - 1) as f64;
                (t, self.sample(t))
            })
            .collect()
    }
}

/// The classic jet ramp: dark blue through cyan, yellow and red.
fn jet() -> ColorTable {
    let ramp = (0..RAMP_LEN)
        .map(|i| {
            let t = i as f64 / (RAMP_LEN - 1) as f64;
            let r = jet_channel(4.0 * t - 3.0);
            let g = jet_channel(4.0 * t - 2.0);
            let b = jet_channel(4.0 * t - 1.0);
            Color::new(to_byte(r), to_byte(g), to_byte(b), 255)
        })
        .collect();
    ColorTable {
        name: "jet".to_string(),
        ramp,
        missing: Color::transparent(),
    }
}

/// Piecewise-linear tent shared by the three jet channels.
fn jet_channel(u: f64) -> f64 {
    (1.5 - u.abs()).clamp(0.0, 1.0)
}

fn to_byte(v: f64) -> u8 {
    (v * 255.0).round() as u8
}
