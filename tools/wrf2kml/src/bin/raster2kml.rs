//! Render a wrfout variable as a georeferenced KML/KMZ raster overlay with
//! a colorbar legend.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use kml::{KmlColor, KmlDocument};
use renderer::{project_raster, render_legend, ColorTable, Orientation, RasterOptions};
use viz_common::{EsmfTime, VizError, VizResult};
use wrfout::WrfDataset;

#[derive(Parser, Debug)]
#[command(name = "raster2kml")]
#[command(about = "Render a wrfout variable as a KML/KMZ ground overlay")]
struct Args {
    /// Input wrfout NetCDF file
    wrfout: PathBuf,

    /// Variable name (must have registered rendering wisdom)
    varname: String,

    /// Display units for the colorbar
    units: String,

    /// ESMF timestamp, e.g. 2020-01-01_00:00:00
    esmf_time: String,

    /// Output document; a .kmz extension selects compressed packaging
    target: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args: Args = wrf2kml::parse_args();
    wrf2kml::init_tracing(&args.log_level);
    if let Err(err) = run(&args) {
        wrf2kml::exit_with(err);
    }
}

fn run(args: &Args) -> VizResult<()> {
    // A non-timestamp here is a malformed invocation, not a dataset miss
    let time = EsmfTime::parse(&args.esmf_time)
        .map_err(|e| VizError::Usage(e.to_string()))?
        .label();

    let dataset = WrfDataset::open(&args.wrfout)?;
    let (field, coords) = wrfout::extract(&dataset, &args.varname, &time)?;

    let wisdom = wisdom::lookup(&args.varname)
        .ok_or_else(|| VizError::VariableNotFound(args.varname.clone()))?;
    let range = wisdom::resolve_range(&field, wisdom, &args.units)?;
    let field = wisdom::clamp_field(&field, &range);
    let table = ColorTable::by_name(wisdom.colormap).ok_or_else(|| {
        VizError::Render(format!("unknown color table '{}'", wisdom.colormap))
    })?;

    let mut doc = KmlDocument::new(&args.varname);

    info!("rendering colorbar as a screen overlay");
    let legend = render_legend(
        &range,
        Orientation::Vertical,
        400,
        &table,
        &args.units,
        &args.varname,
    )?;
    doc.attach_file("colorbar.png", legend);
    doc.add_screen_overlay(
        "colorbar",
        "colorbar.png",
        Some(KmlColor::WHITE.with_alpha(150)),
        (0.0, 1.0),
        (0.02, 0.98),
    );

    info!(
        variable = %args.varname,
        min = range.native.0,
        max = range.native.1,
        "rendering raster (Mercator projection)"
    );
    let artifact = project_raster(&coords, &field, &range, &table, &RasterOptions::default())?;
    doc.add_ground_overlay(
        &args.varname,
        "raster.png",
        Some(KmlColor::WHITE.with_alpha(0x80)),
        artifact.corners,
    );
    doc.attach_file("raster.png", artifact.png);

    doc.save(&args.target)?;
    info!(target = %args.target.display(), "done");
    Ok(())
}
