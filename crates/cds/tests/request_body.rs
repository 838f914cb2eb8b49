//! Integration test: request bodies match what the archive expects.

use reforce_calendar::YearMonth;
use reforce_cds::{Area, GridSpacing, RetrieveRequest};
use serde_json::json;

const ERA5_VARIABLES: [&str; 9] = [
    "10m_u_component_of_wind",
    "10m_v_component_of_wind",
    "2m_dewpoint_temperature",
    "2m_temperature",
    "surface_pressure",
    "snowfall",
    "total_precipitation",
    "surface_solar_radiation_downwards",
    "surface_thermal_radiation_downwards",
];

#[test]
fn full_month_body() {
    let month: YearMonth = "2018-01".parse().unwrap();
    let request = RetrieveRequest::monthly(ERA5_VARIABLES, month)
        .with_area(Area::from([66.0, -5.0, 48.0, 31.0]))
        .with_grid(GridSpacing::from([0.206_896_551_724_137_93, 0.1125]));
    let body = request.to_json().unwrap();

    assert_eq!(body["product_type"], "reanalysis");
    assert_eq!(body["format"], "netcdf");
    assert_eq!(body["year"], "2018");
    assert_eq!(body["month"], "01");
    assert_eq!(body["variable"].as_array().unwrap().len(), 9);
    assert_eq!(body["day"].as_array().unwrap().len(), 31);
    assert_eq!(body["day"][0], "01");
    assert_eq!(body["day"][30], "31");
    assert_eq!(body["time"][0], "00:00");
    assert_eq!(body["time"][23], "23:00");
    assert_eq!(body["area"], json!([66.0, -5.0, 48.0, 31.0]));
    assert_eq!(body["grid"], json!([0.206_896_551_724_137_93, 0.1125]));
}

#[test]
fn leap_february_has_29_days() {
    let month: YearMonth = "2016-02".parse().unwrap();
    let body = RetrieveRequest::monthly(["snowfall"], month)
        .to_json()
        .unwrap();
    let days = body["day"].as_array().unwrap();
    assert_eq!(days.len(), 29);
    assert_eq!(days[28], "29");
}

#[test]
fn overrides_reach_the_body() {
    let month: YearMonth = "2020-06".parse().unwrap();
    let body = RetrieveRequest::monthly(["snowfall"], month)
        .with_product_type("ensemble_mean")
        .with_format("grib")
        .to_json()
        .unwrap();
    assert_eq!(body["product_type"], "ensemble_mean");
    assert_eq!(body["format"], "grib");
}
