mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use camino::Utf8Path;
use common::{assert_angle_close, load, load_with, utc};
use horizons_track::constants::Radii;
use horizons_track::conversion::{direction_from_radec, dms_to_rad, hms_to_rad};
use horizons_track::observers::topocentric::topocentric_to_geocentric;
use horizons_track::{EphemError, EphemerisDocument, FormatKind, ImportParams, AU};
use nalgebra::Vector3;

#[test]
fn test_geocentric_angular_file() {
    let document = load("venus_geocentric.txt");

    assert_eq!(document.target_name(), "Venus (299)");
    assert_eq!(document.center_name(), "Earth (399)");
    assert_eq!(document.target_id(), Some(299));
    assert_eq!(document.center_id(), Some(399));
    assert_eq!(document.reference_frame(), Some("ICRF"));
    assert_eq!(document.format_kind(), FormatKind::AngularAstrometric);
    assert!(!document.is_topocentric());
    assert_eq!(document.target_radii(), Radii::new(6051.8, 6051.8, 6051.8));
    assert_eq!(document.center_radii(), Radii::new(6378.137, 6378.137, 6356.752));

    let entries = document.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].time_utc, utc(2024, 1, 1, 0, 0));
    assert_eq!(entries[2].time_utc, utc(2024, 1, 1, 2, 0));
    for entry in entries {
        assert_eq!(entry.direction, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(entry.range_au, 1.0);
        assert_abs_diff_eq!(entry.position_km, Vector3::new(AU, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(entry.velocity_km_s, Vector3::zeros());
    }
}

#[test]
fn test_equatorial_radius_fallback() {
    let document = load("venus_equ_radius.txt");
    assert_eq!(document.target_radii(), Radii::new(6051.8, 6051.8, 6051.8));
    assert_eq!(document.center_radii(), Radii::new(1000.0, 1000.0, 1000.0));

    let entry = &document.entries()[0];
    assert_relative_eq!(entry.right_ascension, hms_to_rad(18.0, 46.0, 44.65));
    assert_relative_eq!(entry.declination, dms_to_rad(true, 23.0, 9.0, 30.1));
    assert_eq!(entry.range_au, 1.31262213046298);

    for entry in document.entries() {
        assert_relative_eq!(entry.direction.norm(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_topocentric_correction() {
    let document = load("mars_topocentric.txt");
    assert!(document.is_topocentric());

    let site = document.observer_site().unwrap();
    assert_eq!(site.name.as_deref(), Some("Palomar Mountain--Hale"));
    let cylindrical = site.cylindrical.unwrap();
    assert_eq!(cylindrical.radial, 5335.43579);

    let entry = &document.entries()[0];
    let t = utc(2024, 1, 1, 6, 0);
    let raw = direction_from_radec(hms_to_rad(18.0, 0.0, 0.0), dms_to_rad(true, 24.0, 0.0, 0.0));
    let expected = topocentric_to_geocentric(&raw, 2.4, &t, &cylindrical, AU);

    assert_abs_diff_eq!(entry.position_km, expected.position_km, epsilon = 1e-6);
    assert_relative_eq!(entry.range_au, expected.range_au, epsilon = 1e-14);
    assert_relative_eq!(entry.direction.norm(), 1.0, epsilon = 1e-12);
    // the site is a few thousand km away from the geocenter
    assert!((entry.range_au - 2.4).abs() < 7000.0 / AU);
    assert!((entry.range_au - 2.4).abs() > 0.0);

    let uncorrected = raw * (2.4 * AU);
    let shift = (entry.position_km - uncorrected).norm();
    assert_relative_eq!(shift, cylindrical.body_fixed_position().norm(), epsilon = 1e-6);
}

#[test]
fn test_topocentric_without_cylindric_line() {
    let document = load("mars_topocentric_no_cylindric.txt");
    assert!(document.is_topocentric());
    assert!(document.observer_site().unwrap().cylindrical.is_none());
    assert!(document.observer_site().unwrap().geodetic.is_some());

    let entry = &document.entries()[0];
    let raw = direction_from_radec(hms_to_rad(18.0, 0.0, 0.0), dms_to_rad(true, 24.0, 0.0, 0.0));
    assert_abs_diff_eq!(entry.position_km, raw * (2.4 * AU), epsilon = 1e-6);
    assert_eq!(entry.range_au, 2.4);
}

#[test]
fn test_correction_can_be_disabled() {
    let params = ImportParams::builder()
        .topocentric_correction(false)
        .build()
        .unwrap();
    assert_eq!(
        load_with("mars_topocentric.txt", &params).entries(),
        load_with("mars_topocentric_no_cylindric.txt", &params).entries()
    );
}

#[test]
fn test_state_vector_file() {
    let document = load("mars_vectors.txt");
    assert_eq!(document.format_kind(), FormatKind::CartesianStateVector);
    assert!(!document.is_topocentric());

    // the 01:00 record has no velocity line
    let entries = document.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].time_utc, utc(2024, 1, 1, 0, 0));
    assert_eq!(entries[1].time_utc, utc(2024, 1, 1, 2, 0));
    assert_eq!(entries[2].time_utc, utc(2024, 1, 1, 3, 0));

    let position = Vector3::new(
        -2.649903367743050e7,
        -3.327574173547878e8,
        -1.355671839918904e8,
    );
    let first = &entries[0];
    assert_eq!(first.position_km, position);
    assert_eq!(
        first.velocity_km_s,
        Vector3::new(2.979426006719171e1, -5.018052460117524, -2.175393905034988)
    );
    assert_relative_eq!(first.range_au, position.norm() / AU);
    assert_relative_eq!(first.direction, position / position.norm());
    assert_angle_close(first.right_ascension, position.y.atan2(position.x), 1e-14);
    assert_relative_eq!(first.declination, (position.z / position.norm()).asin());
    assert!((0.0..std::f64::consts::TAU).contains(&first.right_ascension));
}

#[test]
fn test_angular_and_cartesian_agree_on_direction() {
    // RA/DEC derived from a Cartesian row fed back through the angular convention
    let document = load("mars_vectors.txt");
    for entry in document.entries() {
        let p = entry.position_km / entry.position_km.norm();
        let (ra, dec) = (entry.right_ascension, entry.declination);
        assert_relative_eq!(dec.sin(), p.z, epsilon = 1e-12);
        assert_relative_eq!(dec.cos() * ra.cos(), p.x, epsilon = 1e-12);
        assert_relative_eq!(dec.cos() * ra.sin(), p.y, epsilon = 1e-12);

        let angular = direction_from_radec(ra, dec);
        assert_relative_eq!(angular.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(angular.y, p.z, epsilon = 1e-12);
    }
}

#[test]
fn test_missing_target_name() {
    common::init_logger();
    let result = EphemerisDocument::read_file(
        Utf8Path::new("tests/data/missing_target.txt"),
        &ImportParams::default(),
    );
    assert_eq!(
        result,
        Err(EphemError::MissingHeaderField("Target body name"))
    );
}

#[test]
fn test_unreadable_file() {
    let result = EphemerisDocument::read_file(
        Utf8Path::new("tests/data/not_there.txt"),
        &ImportParams::default(),
    );
    assert!(matches!(
        result,
        Err(EphemError::FileUnreadable { ref path, .. }) if path == "tests/data/not_there.txt"
    ));
}

#[test]
fn test_import_is_idempotent() {
    for file in [
        "venus_geocentric.txt",
        "venus_equ_radius.txt",
        "mars_topocentric.txt",
        "mars_vectors.txt",
    ] {
        assert_eq!(load(file), load(file));
    }
}

#[test]
fn test_report_without_rows() {
    let report = "\
Target body name: Ceres (1)
Center body name: Sun (10)
$$SOE
$$EOE
";
    let document: EphemerisDocument = report.parse().unwrap();
    assert!(document.entries().is_empty());
    assert!(document.track().is_empty());
}
