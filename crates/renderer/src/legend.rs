//! Colorbar legend rendering.
//!
//! The legend is composed as an SVG document (gradient strip, tick labels,
//! unit and title text) and rasterized with resvg. Inputs fully determine
//! the SVG string, so identical inputs produce identical pixels.

use tracing::debug;
use viz_common::{VizError, VizResult};
use wisdom::RenderRange;

use crate::colormap::ColorTable;
use crate::png;

/// Long-axis direction of the colorbar strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Number of tick labels along the strip.
const TICK_COUNT: usize = 5;

/// Short axis as a fraction of the long axis.
const ASPECT: f64 = 0.5;

const FONT_FAMILY: &str = "DejaVu Sans, sans-serif";
const INK: &str = "#333333";

/// Render a standalone colorbar for the given display range.
///
/// `size_px` sets the long-axis dimension; the short axis is a fixed
/// proportion of it. Returns encoded PNG bytes.
pub fn render_legend(
    range: &RenderRange,
    orientation: Orientation,
    size_px: u32,
    table: &ColorTable,
    unit_label: &str,
    title: &str,
) -> VizResult<Vec<u8>> {
    let long = size_px.max(64) as f64;
    let short = long * ASPECT;
    let (width, height) = match orientation {
        Orientation::Vertical => (short, long),
        Orientation::Horizontal => (long, short),
    };

    let svg = compose_svg(range, orientation, width, height, table, unit_label, title);
    debug!(width, height, table = table.name(), "rasterizing legend");
    rasterize_svg(&svg, width.round() as u32, height.round() as u32)
}

fn compose_svg(
    range: &RenderRange,
    orientation: Orientation,
    width: f64,
    height: f64,
    table: &ColorTable,
    unit_label: &str,
    title: &str,
) -> String {
    let long = width.max(height);
    let font = (long / 28.0).clamp(9.0, 18.0);
    let (lo, hi) = range.display;

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"##
    ));
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{width:.0}" height="{height:.0}" fill="#ffffff"/>"##
    ));

    // Gradient definition: offset 0 is the range minimum, anchored at the
    // bottom (vertical) or left (horizontal) end of the strip.
    let (x1, y1, x2, y2) = match orientation {
        Orientation::Vertical => ("0", "1", "0", "0"),
        Orientation::Horizontal => ("0", "0", "1", "0"),
    };
    svg.push_str(&format!(
        r##"<defs><linearGradient id="ramp" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" gradientUnits="objectBoundingBox">"##
    ));
    for (t, color) in table.gradient_stops(17) {
        svg.push_str(&format!(
            r##"<stop offset="{t:.4}" stop-color="#{:02x}{:02x}{:02x}"/>"##,
            color.r, color.g, color.b
        ));
    }
    svg.push_str("</linearGradient></defs>");

    // Title
    svg.push_str(&format!(
        r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{fs:.1}" font-weight="600" fill="{INK}">{t}</text>"##,
        x = width / 2.0,
        y = font * 1.4,
        fs = font * 1.2,
        t = xml_escape(title),
    ));

    match orientation {
        Orientation::Vertical => {
            let bar_x = width * 0.18;
            let bar_w = width * 0.20;
            let bar_top = height * 0.10;
            let bar_h = height * 0.82;
            svg.push_str(&format!(
                r##"<rect x="{bar_x:.1}" y="{bar_top:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="url(#ramp)" stroke="{INK}" stroke-width="1"/>"##
            ));
            for i in 0..TICK_COUNT {
                let frac = i as f64 / (TICK_COUNT - 1) as f64;
                let value = lo + frac * (hi - lo);
                let y = bar_top + bar_h - frac * bar_h;
                svg.push_str(&format!(
                    r##"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{INK}" stroke-width="1"/>"##,
                    x1 = bar_x + bar_w,
                    x2 = bar_x + bar_w + font * 0.4,
                ));
                svg.push_str(&format!(
                    r##"<text x="{x:.1}" y="{ty:.1}" font-family="{FONT_FAMILY}" font-size="{font:.1}" fill="{INK}">{v}</text>"##,
                    x = bar_x + bar_w + font * 0.7,
                    ty = y + font * 0.35,
                    v = format_tick(value),
                ));
            }
            svg.push_str(&format!(
                r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{font:.1}" fill="{INK}">{u}</text>"##,
                x = width / 2.0,
                y = height - font * 0.5,
                u = xml_escape(unit_label),
            ));
        }
        Orientation::Horizontal => {
            let bar_y = height * 0.28;
            let bar_h = height * 0.20;
            let bar_left = width * 0.06;
            let bar_w = width * 0.88;
            svg.push_str(&format!(
                r##"<rect x="{bar_left:.1}" y="{bar_y:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="url(#ramp)" stroke="{INK}" stroke-width="1"/>"##
            ));
            for i in 0..TICK_COUNT {
                let frac = i as f64 / (TICK_COUNT - 1) as f64;
                let value = lo + frac * (hi - lo);
                let x = bar_left + frac * bar_w;
                svg.push_str(&format!(
                    r##"<line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="{INK}" stroke-width="1"/>"##,
                    y1 = bar_y + bar_h,
                    y2 = bar_y + bar_h + font * 0.4,
                ));
                svg.push_str(&format!(
                    r##"<text x="{x:.1}" y="{ty:.1}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{font:.1}" fill="{INK}">{v}</text>"##,
                    ty = bar_y + bar_h + font * 1.6,
                    v = format_tick(value),
                ));
            }
            svg.push_str(&format!(
                r##"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-family="{FONT_FAMILY}" font-size="{font:.1}" fill="{INK}">{u}</text>"##,
                x = width / 2.0,
                y = height - font * 0.5,
                u = xml_escape(unit_label),
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Parse and rasterize the SVG, then encode the pixmap as PNG.
fn rasterize_svg(svg: &str, width: u32, height: u32) -> VizResult<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| VizError::Render(format!("legend SVG parse failed: {}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| VizError::Render(format!("invalid legend size {}x{}", width, height)))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; PNG wants straight RGBA
    let mut pixels = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    png::create_png_auto(&pixels, width as usize, height as usize).map_err(VizError::Render)
}

/// Compact tick formatting: plain decimals in the readable range,
/// scientific elsewhere.
fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let a = v.abs();
    if a >= 10000.0 || a < 0.01 {
        format!("{:.2e}", v)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(1013.25), "1013.25");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(30.0), "30");
        assert_eq!(format_tick(123456.0), "1.23e5");
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("J/m/s^2 & <more>"), "J/m/s^2 &amp; &lt;more&gt;");
    }

    #[test]
    fn test_svg_composition_is_deterministic() {
        let range = RenderRange {
            native: (0.0, 1.0),
            display: (0.0, 1.0),
            display_unit: "-".to_string(),
        };
        let table = ColorTable::by_name("jet").unwrap();
        let a = compose_svg(&range, Orientation::Vertical, 200.0, 400.0, &table, "-", "F_ROS");
        let b = compose_svg(&range, Orientation::Vertical, 200.0, 400.0, &table, "-", "F_ROS");
        assert_eq!(a, b);
        assert!(a.starts_with("<svg"));
        assert!(a.contains("linearGradient"));
    }
}
