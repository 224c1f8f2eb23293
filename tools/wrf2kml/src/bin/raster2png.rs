//! Render a wrfout variable as a raw Mercator PNG plus a corner-coordinate
//! sidecar, optionally with a standalone colorbar PNG.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use renderer::{project_raster, render_legend, ColorTable, Orientation, RasterOptions};
use viz_common::{EsmfTime, VizError, VizResult};
use wrfout::WrfDataset;

#[derive(Parser, Debug)]
#[command(name = "raster2png")]
#[command(about = "Render a wrfout variable as a georeferenced PNG with a coords sidecar")]
struct Args {
    /// Input wrfout NetCDF file
    wrfout: PathBuf,

    /// Variable name (must have registered rendering wisdom)
    varname: String,

    /// ESMF timestamp, e.g. 2020-01-01_00:00:00
    esmf_time: String,

    /// Output raster PNG path
    target: PathBuf,

    /// Output corner-coordinates sidecar, one "lon,lat" per line in
    /// SW, SE, NE, NW order
    coords_file: PathBuf,

    /// Display units for the colorbar
    #[arg(requires = "colorbar_file")]
    units: Option<String>,

    /// Output colorbar PNG path
    #[arg(requires = "units")]
    colorbar_file: Option<PathBuf>,

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

    let wisdom = wisdom::lookup(&args.varname)
        .ok_or_else(|| VizError::VariableNotFound(args.varname.clone()))?;
    // Without an explicit display unit the colorbar would not be rendered
    // anyway, so the native unit stands in for range conversion.
    let units = args
        .units
        .clone()
        .unwrap_or_else(|| wisdom.native_unit.to_string());
    let range = wisdom::resolve_range(&field, wisdom, &units)?;
    let field = wisdom::clamp_field(&field, &range);
    let table = ColorTable::by_name(wisdom.colormap).ok_or_else(|| {
        VizError::Render(format!("unknown color table '{}'", wisdom.colormap))
    })?;

    if let Some(colorbar_file) = &args.colorbar_file {
        info!(target = %colorbar_file.display(), "rendering colorbar");
        let legend = render_legend(
            &range,
            Orientation::Vertical,
            400,
            &table,
            &units,
            &args.varname,
        )?;
        std::fs::write(colorbar_file, legend)?;
    }

    info!(
        variable = %args.varname,
        target = %args.target.display(),
        "creating raster from grid (spherical Mercator)"
    );
    let artifact = project_raster(&coords, &field, &range, &table, &RasterOptions::default())?;
    std::fs::write(&args.target, &artifact.png)?;

    let mut sidecar = std::fs::File::create(&args.coords_file)?;
    for (lon, lat) in artifact.corners {
        writeln!(sidecar, "{:.6},{:.6}", lon, lat)?;
    }

    info!("done");
    Ok(())
}
