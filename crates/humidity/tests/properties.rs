//! Physical properties of the humidity estimator over realistic ranges.

use approx::assert_relative_eq;
use ndarray::Array2;
use reforce_humidity::{specific_humidity, specific_humidity_array};

const T_MIN: f64 = 250.0;
const T_MAX: f64 = 310.0;
const P_MIN: f64 = 90_000.0;
const P_MAX: f64 = 105_000.0;

fn dewpoints(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| T_MIN + (T_MAX - T_MIN) * i as f64 / (n - 1) as f64)
        .collect()
}

fn pressures(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| P_MIN + (P_MAX - P_MIN) * i as f64 / (n - 1) as f64)
        .collect()
}

#[test]
fn output_within_bounds() {
    for &t in &dewpoints(61) {
        for &p in &pressures(16) {
            let q = specific_humidity(t, p);
            assert!(q > 0.0 && q < 0.05, "q({t}, {p}) = {q} outside (0, 0.05)");
        }
    }
}

#[test]
fn increasing_in_dewpoint() {
    for &p in &pressures(16) {
        let qs: Vec<f64> = dewpoints(121)
            .iter()
            .map(|&t| specific_humidity(t, p))
            .collect();
        for (i, w) in qs.windows(2).enumerate() {
            assert!(w[1] > w[0], "not increasing in T at step {i} for p={p}");
        }
    }
}

#[test]
fn decreasing_in_pressure() {
    for &t in &dewpoints(61) {
        let qs: Vec<f64> = pressures(31)
            .iter()
            .map(|&p| specific_humidity(t, p))
            .collect();
        for (i, w) in qs.windows(2).enumerate() {
            assert!(w[1] < w[0], "not decreasing in p at step {i} for T={t}");
        }
    }
}

#[test]
fn pure_and_repeatable() {
    let t = Array2::from_shape_fn((12, 7), |(i, j)| 255.0 + i as f64 * 4.0 + j as f64);
    let p = Array2::from_shape_fn((12, 7), |(i, j)| 92_000.0 + i as f64 * 900.0 + j as f64);
    let first = specific_humidity_array(t.view(), p.view()).unwrap();
    let second = specific_humidity_array(t.view(), p.view()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reference_scenario_from_formula() {
    let e_sat = 611.21 * (17.502 * (288.0 - 273.16) / (288.0 - 32.19_f64)).exp();
    let r = 287.0597 / 461.5250;
    let expected = r * e_sat / (101_325.0 - (1.0 - r) * e_sat);
    assert_relative_eq!(
        specific_humidity(288.0, 101_325.0),
        expected,
        max_relative = 1e-12
    );
    assert_relative_eq!(expected, 0.010_42, max_relative = 1e-3);
}
