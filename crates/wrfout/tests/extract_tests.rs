//! Integration tests against a synthetic wrfout file.

use tempfile::TempDir;
use wrfout::{extract, GridFamily, WrfDataset};

const TIMES: [&str; 2] = ["2020-01-01_00:00:00", "2020-01-01_01:00:00"];

/// Write a miniature wrfout-shaped file: a 3x4 atmospheric mesh, a 6x8 fire
/// mesh, one variable on each, and two time steps.
fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("wrfout_d01.nc");
    let mut file = netcdf::create(&path).unwrap();

    file.add_dimension("Time", 2).unwrap();
    file.add_dimension("DateStrLen", 19).unwrap();
    file.add_dimension("south_north", 3).unwrap();
    file.add_dimension("west_east", 4).unwrap();
    file.add_dimension("south_north_subgrid", 6).unwrap();
    file.add_dimension("west_east_subgrid", 8).unwrap();

    let mut times = file
        .add_variable::<u8>("Times", &["Time", "DateStrLen"])
        .unwrap();
    let mut buf = Vec::new();
    for t in TIMES {
        buf.extend_from_slice(t.as_bytes());
    }
    times.put_values(&buf, (.., ..)).unwrap();

    let coord = |rows: usize, cols: usize, step: f64| -> (Vec<f32>, Vec<f32>) {
        let mut lon = Vec::new();
        let mut lat = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                lon.push((-105.0 + c as f64 * step) as f32);
                lat.push((39.0 + r as f64 * step) as f32);
            }
        }
        (lon, lat)
    };

    let (lon, lat) = coord(3, 4, 0.1);
    let mut xlong = file
        .add_variable::<f32>("XLONG", &["Time", "south_north", "west_east"])
        .unwrap();
    xlong.put_values(&lon, (0, .., ..)).unwrap();
    let mut xlat = file
        .add_variable::<f32>("XLAT", &["Time", "south_north", "west_east"])
        .unwrap();
    xlat.put_values(&lat, (0, .., ..)).unwrap();

    let (flon, flat) = coord(6, 8, 0.05);
    let mut fxlong = file
        .add_variable::<f32>("FXLONG", &["Time", "south_north_subgrid", "west_east_subgrid"])
        .unwrap();
    fxlong.put_values(&flon, (0, .., ..)).unwrap();
    let mut fxlat = file
        .add_variable::<f32>("FXLAT", &["Time", "south_north_subgrid", "west_east_subgrid"])
        .unwrap();
    fxlat.put_values(&flat, (0, .., ..)).unwrap();

    let mut t2 = file
        .add_variable::<f32>("T2", &["Time", "south_north", "west_east"])
        .unwrap();
    let step0: Vec<f32> = (0..12).map(|i| 280.0 + i as f32).collect();
    let step1: Vec<f32> = (0..12).map(|i| 290.0 + i as f32).collect();
    t2.put_values(&step0, (0, .., ..)).unwrap();
    t2.put_values(&step1, (1, .., ..)).unwrap();

    let mut ros = file
        .add_variable::<f32>("F_ROS", &["Time", "south_north_subgrid", "west_east_subgrid"])
        .unwrap();
    ros.put_attribute("_FillValue", -9999.0f32).unwrap();
    let mut fire: Vec<f32> = (0..48).map(|i| i as f32 * 0.01).collect();
    fire[5] = -9999.0;
    ros.put_values(&fire, (0, .., ..)).unwrap();
    ros.put_values(&fire, (1, .., ..)).unwrap();

    drop(file);
    path
}

#[test]
fn test_times_decoding() {
    let dir = TempDir::new().unwrap();
    let ds = WrfDataset::open(write_fixture(&dir)).unwrap();
    assert_eq!(ds.times().unwrap(), TIMES);
}

#[test]
fn test_extract_selects_requested_time_slice() {
    let dir = TempDir::new().unwrap();
    let ds = WrfDataset::open(write_fixture(&dir)).unwrap();

    let (field, grid) = extract(&ds, "T2", "2020-01-01_01:00:00").unwrap();
    assert_eq!(field.shape(), (3, 4));
    assert_eq!(grid.shape(), (3, 4));
    // Slice at index 1, not index 0
    assert_eq!(field.get(0, 0), 290.0);
}

#[test]
fn test_absent_time_label_is_time_not_found() {
    let dir = TempDir::new().unwrap();
    let ds = WrfDataset::open(write_fixture(&dir)).unwrap();

    let err = extract(&ds, "T2", "2020-01-01_02:00:00").unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_fire_variable_falls_back_to_fire_mesh() {
    let dir = TempDir::new().unwrap();
    let ds = WrfDataset::open(write_fixture(&dir)).unwrap();

    let (field, grid) = extract(&ds, "F_ROS", "2020-01-01_00:00:00").unwrap();
    assert_eq!(field.shape(), (6, 8));
    assert_eq!(grid.shape(), (6, 8));
}

#[test]
fn test_fill_values_become_nan() {
    let dir = TempDir::new().unwrap();
    let ds = WrfDataset::open(write_fixture(&dir)).unwrap();

    let (field, _) = extract(&ds, "F_ROS", "2020-01-01_00:00:00").unwrap();
    assert!(field.get(0, 5).is_nan());
    assert!(!field.get(0, 4).is_nan());
}

#[test]
fn test_coord_grid_families() {
    let dir = TempDir::new().unwrap();
    let ds = WrfDataset::open(write_fixture(&dir)).unwrap();

    assert_eq!(ds.coord_grid(GridFamily::Atmosphere).unwrap().shape(), (3, 4));
    assert_eq!(ds.coord_grid(GridFamily::Fire).unwrap().shape(), (6, 8));
    assert!(ds.coord_grid(GridFamily::MassPoint).is_err());
}
