//! Trace the zero level set of a wrfout variable into KML outline polygons.
//!
//! The observed use is fire-perimeter extraction: the level-set function's
//! zero crossing on the fire mesh is the perimeter at that time step.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use kml::{KmlDocument, PolyStyle};
use vector::extract_contours;
use viz_common::{EsmfTime, VizError, VizResult};
use wrfout::WrfDataset;

/// The one contour level the product traces.
const LEVELS: [f64; 1] = [0.0];

#[derive(Parser, Debug)]
#[command(name = "contour2kml")]
#[command(about = "Trace a wrfout variable's zero contour into KML polygons")]
struct Args {
    /// Input wrfout NetCDF file
    wrfout: PathBuf,

    /// Variable name
    varname: String,

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
    let time = EsmfTime::parse(&args.esmf_time)
        .map_err(|e| VizError::Usage(e.to_string()))?
        .label();

    let dataset = WrfDataset::open(&args.wrfout)?;
    let (field, coords) = wrfout::extract(&dataset, &args.varname, &time)?;

    let polygons = extract_contours(&field, &coords, &LEVELS);
    info!(
        variable = %args.varname,
        time = %time,
        polygons = polygons.len(),
        "traced contours"
    );

    let mut doc = KmlDocument::new(&time);
    for (i, ring) in polygons.into_iter().enumerate() {
        doc.add_polygon(format!("contour {}", i + 1), ring, PolyStyle::default());
    }
    doc.save(&args.target)?;

    info!(target = %args.target.display(), "done");
    Ok(())
}
