//! KML/KMZ document writing.
//!
//! Builds a KML document from named polygons, ground overlays and screen
//! overlays, with image attachments held in memory. Saving picks the
//! packaging from the output extension: `.kmz` produces a ZIP archive with
//! `doc.kml` first and the attachments alongside, anything else writes
//! plain XML (attachments land next to the file). Because attachments stay
//! in memory until save time, a failed render never leaves stray image
//! files behind.

mod kmz;

use std::io::Cursor;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::info;
use viz_common::{GeoPolygon, VizError, VizResult};

/// A KML `aabbggrr` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmlColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl KmlColor {
    pub const RED: KmlColor = KmlColor::rgb(255, 0, 0);
    pub const WHITE: KmlColor = KmlColor::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Hex encoding in KML's aabbggrr channel order.
    fn to_kml(self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.a, self.b, self.g, self.r)
    }
}

/// Line/fill styling for polygon placemarks.
#[derive(Debug, Clone, Copy)]
pub struct PolyStyle {
    pub line_color: KmlColor,
    pub line_width: f32,
    pub fill: bool,
    pub outline: bool,
}

impl Default for PolyStyle {
    /// The outline style used for contours and domain boundaries.
    fn default() -> Self {
        Self {
            line_color: KmlColor::RED,
            line_width: 3.0,
            fill: false,
            outline: true,
        }
    }
}

#[derive(Debug, Clone)]
struct PolygonPlacemark {
    name: String,
    ring: GeoPolygon,
    style: PolyStyle,
}

#[derive(Debug, Clone)]
struct GroundOverlay {
    name: String,
    icon: String,
    color: Option<KmlColor>,
    /// Corner coordinates in SW, SE, NE, NW order.
    quad: [(f64, f64); 4],
}

#[derive(Debug, Clone)]
struct ScreenOverlay {
    name: String,
    icon: String,
    color: Option<KmlColor>,
    overlay_xy: (f32, f32),
    screen_xy: (f32, f32),
}

/// A KML document under construction.
#[derive(Debug, Default)]
pub struct KmlDocument {
    name: String,
    polygons: Vec<PolygonPlacemark>,
    ground_overlays: Vec<GroundOverlay>,
    screen_overlays: Vec<ScreenOverlay>,
    files: Vec<(String, Vec<u8>)>,
}

impl KmlDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an outlined polygon placemark.
    pub fn add_polygon(&mut self, name: impl Into<String>, ring: GeoPolygon, style: PolyStyle) {
        self.polygons.push(PolygonPlacemark {
            name: name.into(),
            ring,
            style,
        });
    }

    /// Add a georeferenced image draped over a quad. Corners are SW, SE,
    /// NE, NW.
    pub fn add_ground_overlay(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: Option<KmlColor>,
        quad: [(f64, f64); 4],
    ) {
        self.ground_overlays.push(GroundOverlay {
            name: name.into(),
            icon: icon.into(),
            color,
            quad,
        });
    }

    /// Add a viewport-anchored image. Both anchors are screen fractions.
    pub fn add_screen_overlay(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: Option<KmlColor>,
        overlay_xy: (f32, f32),
        screen_xy: (f32, f32),
    ) {
        self.screen_overlays.push(ScreenOverlay {
            name: name.into(),
            icon: icon.into(),
            color,
            overlay_xy,
            screen_xy,
        });
    }

    /// Attach an in-memory file (e.g. an overlay PNG) to be packaged with
    /// the document.
    pub fn attach_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.files.push((name.into(), bytes));
    }

    /// Serialize the document to KML XML.
    pub fn to_xml(&self) -> VizResult<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        let xml_err = |e: quick_xml::Error| VizError::Render(format!("KML serialization: {}", e));

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)?;

        let mut kml = BytesStart::new("kml");
        kml.push_attribute(("xmlns", "http://www.opengis.net/kml/2.2"));
        kml.push_attribute(("xmlns:gx", "http://www.google.com/kml/ext/2.2"));
        writer.write_event(Event::Start(kml)).map_err(xml_err)?;
        writer
            .write_event(Event::Start(BytesStart::new("Document")))
            .map_err(xml_err)?;
        write_text_element(&mut writer, "name", &self.name).map_err(xml_err)?;

        for screen in &self.screen_overlays {
            write_screen_overlay(&mut writer, screen).map_err(xml_err)?;
        }
        for ground in &self.ground_overlays {
            write_ground_overlay(&mut writer, ground).map_err(xml_err)?;
        }
        for polygon in &self.polygons {
            write_polygon(&mut writer, polygon).map_err(xml_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("Document")))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new("kml")))
            .map_err(xml_err)?;

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes)
            .map_err(|e| VizError::Render(format!("KML serialization: {}", e)))
    }

    /// Write the document; `.kmz` packages a compressed archive, any other
    /// extension writes plain KML with attachments as sibling files.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> VizResult<()> {
        let path = path.as_ref();
        let xml = self.to_xml()?;

        let is_kmz = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("kmz"))
            .unwrap_or(false);

        if is_kmz {
            let mut entries: Vec<(&str, &[u8])> = vec![("doc.kml", xml.as_bytes())];
            for (name, bytes) in &self.files {
                entries.push((name, bytes));
            }
            kmz::write_archive(path, &entries)?;
        } else {
            std::fs::write(path, xml)?;
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            for (name, bytes) in &self.files {
                std::fs::write(dir.join(name), bytes)?;
            }
        }

        info!(path = %path.display(), kmz = is_kmz, "wrote document");
        Ok(())
    }
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_icon(writer: &mut XmlWriter, href: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("Icon")))?;
    write_text_element(writer, "href", href)?;
    writer.write_event(Event::End(BytesEnd::new("Icon")))?;
    Ok(())
}

fn write_polygon(writer: &mut XmlWriter, placemark: &PolygonPlacemark) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    write_text_element(writer, "name", &placemark.name)?;

    let style = &placemark.style;
    writer.write_event(Event::Start(BytesStart::new("Style")))?;
    writer.write_event(Event::Start(BytesStart::new("LineStyle")))?;
    write_text_element(writer, "color", &style.line_color.to_kml())?;
    write_text_element(writer, "width", &format!("{}", style.line_width))?;
    writer.write_event(Event::End(BytesEnd::new("LineStyle")))?;
    writer.write_event(Event::Start(BytesStart::new("PolyStyle")))?;
    write_text_element(writer, "fill", if style.fill { "1" } else { "0" })?;
    write_text_element(writer, "outline", if style.outline { "1" } else { "0" })?;
    writer.write_event(Event::End(BytesEnd::new("PolyStyle")))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;

    writer.write_event(Event::Start(BytesStart::new("Polygon")))?;
    writer.write_event(Event::Start(BytesStart::new("outerBoundaryIs")))?;
    writer.write_event(Event::Start(BytesStart::new("LinearRing")))?;
    let coords = placemark
        .ring
        .closed()
        .iter()
        .map(|(lon, lat)| format!("{},{},0", lon, lat))
        .collect::<Vec<_>>()
        .join(" ");
    write_text_element(writer, "coordinates", &coords)?;
    writer.write_event(Event::End(BytesEnd::new("LinearRing")))?;
    writer.write_event(Event::End(BytesEnd::new("outerBoundaryIs")))?;
    writer.write_event(Event::End(BytesEnd::new("Polygon")))?;

    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn write_ground_overlay(writer: &mut XmlWriter, overlay: &GroundOverlay) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("GroundOverlay")))?;
    write_text_element(writer, "name", &overlay.name)?;
    if let Some(color) = overlay.color {
        write_text_element(writer, "color", &color.to_kml())?;
    }
    write_icon(writer, &overlay.icon)?;

    // gx:LatLonQuad coordinates run counter-clockwise from the SW corner,
    // matching the raster artifact's fixed corner order.
    writer.write_event(Event::Start(BytesStart::new("gx:LatLonQuad")))?;
    let coords = overlay
        .quad
        .iter()
        .map(|(lon, lat)| format!("{},{}", lon, lat))
        .collect::<Vec<_>>()
        .join(" ");
    write_text_element(writer, "coordinates", &coords)?;
    writer.write_event(Event::End(BytesEnd::new("gx:LatLonQuad")))?;

    writer.write_event(Event::End(BytesEnd::new("GroundOverlay")))?;
    Ok(())
}

fn write_screen_overlay(writer: &mut XmlWriter, overlay: &ScreenOverlay) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("ScreenOverlay")))?;
    write_text_element(writer, "name", &overlay.name)?;
    if let Some(color) = overlay.color {
        write_text_element(writer, "color", &color.to_kml())?;
    }
    write_icon(writer, &overlay.icon)?;

    fn fraction_point(name: &'static str, (x, y): (f32, f32)) -> BytesStart<'static> {
        let mut el = BytesStart::new(name);
        el.push_attribute(("x", format!("{}", x).as_str()));
        el.push_attribute(("y", format!("{}", y).as_str()));
        el.push_attribute(("xunits", "fraction"));
        el.push_attribute(("yunits", "fraction"));
        el
    }
    writer.write_event(Event::Empty(fraction_point("overlayXY", overlay.overlay_xy)))?;
    writer.write_event(Event::Empty(fraction_point("screenXY", overlay.screen_xy)))?;
    writer.write_event(Event::Empty(fraction_point("size", (0.0, 0.0))))?;

    writer.write_event(Event::End(BytesEnd::new("ScreenOverlay")))?;
    Ok(())
}
