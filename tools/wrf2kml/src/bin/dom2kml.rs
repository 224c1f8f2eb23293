//! Render the boundary of one or more simulation domains as KML polygons.
//!
//! Takes geogrid (geo_em) files, one per nested domain, and emits one
//! closed boundary ring each so the domain layout can be inspected in a
//! geographic viewer.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use kml::{KmlDocument, PolyStyle};
use vector::build_boundary;
use viz_common::VizResult;
use wrfout::{GridFamily, WrfDataset};

#[derive(Parser, Debug)]
#[command(name = "dom2kml")]
#[command(about = "Render domain boundaries from geo_em files as KML polygons")]
struct Args {
    /// Name of the output document
    kml_name: String,

    /// Output document; a .kmz extension selects compressed packaging
    target: PathBuf,

    /// One or more geo_em NetCDF files, one per domain
    #[arg(required = true)]
    geo_em: Vec<PathBuf>,

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
    let mut doc = KmlDocument::new(&args.kml_name);

    for path in &args.geo_em {
        let dataset = WrfDataset::open(path)?;
        // geo_em files carry mass-point coordinates; wrfout files passed
        // here still work through the atmospheric mesh.
        let coords = dataset
            .coord_grid(GridFamily::MassPoint)
            .or_else(|_| dataset.coord_grid(GridFamily::Atmosphere))?;

        let ring = build_boundary(&coords)?;
        info!(
            domain = %path.display(),
            vertices = ring.len(),
            "built domain boundary"
        );
        doc.add_polygon(path.display().to_string(), ring, PolyStyle::default());
    }

    doc.save(&args.target)?;
    info!(target = %args.target.display(), "done");
    Ok(())
}
