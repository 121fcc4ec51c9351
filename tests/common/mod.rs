#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8Path;
use hifitime::Epoch;
use horizons_track::{EphemerisDocument, ImportParams};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load(file: &str) -> EphemerisDocument {
    load_with(file, &ImportParams::default())
}

pub fn load_with(file: &str, params: &ImportParams) -> EphemerisDocument {
    init_logger();
    let path = Utf8Path::new("tests/data").join(file);
    EphemerisDocument::read_file(&path, params).unwrap()
}

pub fn utc(year: i32, month: u8, day: u8, hour: u8, minute: u8) -> Epoch {
    Epoch::from_gregorian_utc_hms(year, month, day, hour, minute, 0)
}

/// Compare two angles modulo 2π.
pub fn assert_angle_close(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).rem_euclid(std::f64::consts::TAU);
    let diff = diff.min(std::f64::consts::TAU - diff);
    assert_relative_eq!(diff, 0.0, epsilon = epsilon);
}
