//! Packed ERA5-like fixture files shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;

use netcdf::Extent;

pub const NT: usize = 3;
pub const NY: usize = 2;
pub const NX: usize = 3;
pub const FILL: i16 = -32767;
pub const EPOCH_HOUR: i32 = 1_034_376;

/// Raw `d2m` values; index 4 is the fill value.
pub fn raw_dewpoint() -> Vec<i16> {
    let mut raw: Vec<i16> = (0..(NT * NY * NX) as i16).map(|i| i * 100).collect();
    raw[4] = FILL;
    raw
}

/// `d2m` packed as `raw * 0.01 + 270`, `sp` as `raw * 2 + 100000`.
pub fn write_packed(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_attribute("Conventions", "CF-1.6").unwrap();
    file.add_attribute("history", "fixture").unwrap();

    file.add_dimension("longitude", NX).unwrap();
    file.add_dimension("latitude", NY).unwrap();
    file.add_unlimited_dimension("time").unwrap();

    {
        let mut var = file.add_variable::<f32>("longitude", &["longitude"]).unwrap();
        var.put_attribute("units", "degrees_east").unwrap();
        var.put_values(&[-5.0f32, -4.75, -4.5], ..).unwrap();
    }
    {
        let mut var = file.add_variable::<f32>("latitude", &["latitude"]).unwrap();
        var.put_attribute("units", "degrees_north").unwrap();
        var.put_values(&[66.0f32, 65.875], ..).unwrap();
    }
    {
        let mut var = file.add_variable::<i32>("time", &["time"]).unwrap();
        var.put_attribute("units", "hours since 1900-01-01 00:00:00.0")
            .unwrap();
        var.put_attribute("long_name", "time").unwrap();
        let hours: Vec<i32> = (0..NT as i32).map(|h| EPOCH_HOUR + h).collect();
        let extents: Vec<Extent> = vec![(0..NT).into()];
        var.put_values(&hours, extents).unwrap();
    }

    let dims = ["time", "latitude", "longitude"];
    let extents = || -> Vec<Extent> { vec![(0..NT).into(), (0..NY).into(), (0..NX).into()] };
    {
        let mut var = file.add_variable::<i16>("d2m", &dims).unwrap();
        var.put_attribute("scale_factor", 0.01f64).unwrap();
        var.put_attribute("add_offset", 270.0f64).unwrap();
        var.put_attribute("_FillValue", FILL).unwrap();
        var.put_attribute("missing_value", FILL).unwrap();
        var.put_attribute("units", "K").unwrap();
        var.put_attribute("long_name", "2 metre dewpoint temperature")
            .unwrap();
        var.put_values(&raw_dewpoint(), extents()).unwrap();
    }
    {
        let mut var = file.add_variable::<i16>("sp", &dims).unwrap();
        var.put_attribute("scale_factor", 2.0f64).unwrap();
        var.put_attribute("add_offset", 100_000.0f64).unwrap();
        var.put_attribute("units", "Pa").unwrap();
        var.put_attribute("long_name", "Surface pressure").unwrap();
        let raw: Vec<i16> = (0..(NT * NY * NX) as i16).map(|i| i - 100).collect();
        var.put_values(&raw, extents()).unwrap();
    }
}
