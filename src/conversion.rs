use nalgebra::Vector3;

use crate::constants::{Radian, DPI, RADH};

/// Convert a right ascension given as hours, minutes and seconds to radians.
///
/// `raHours = h + m/60 + s/3600`, `raRad = raHours·π/12`.
pub fn hms_to_rad(hours: f64, minutes: f64, seconds: f64) -> Radian {
    (hours + minutes / 60.0 + seconds / 3600.0) * RADH
}

/// Convert a declination given as degrees, arcminutes and arcseconds to radians.
///
/// The sign is carried separately from the degree field so that `-00 30 00` stays negative.
///
/// Arguments
/// ---------
/// * `negative`: sign of the declination, as read from the degree field text
/// * `degrees`, `arcmin`, `arcsec`: magnitudes of each field (a sign on `degrees` is ignored)
///
/// Return
/// ------
/// * the signed declination in radians
pub fn dms_to_rad(negative: bool, degrees: f64, arcmin: f64, arcsec: f64) -> Radian {
    let sign = if negative { -1.0 } else { 1.0 };
    sign * (degrees.abs() + arcmin / 60.0 + arcsec / 3600.0).to_radians()
}

/// Unit direction of an angular observation.
///
/// The axis layout keeps Y as the polar axis: `(cos δ cos α, sin δ, cos δ sin α)`.
pub fn direction_from_radec(ra: Radian, dec: Radian) -> Vector3<f64> {
    Vector3::new(dec.cos() * ra.cos(), dec.sin(), dec.cos() * ra.sin())
}

/// Inverse of [`direction_from_radec`]: right ascension in [0, 2π) and declination.
pub fn radec_from_direction(direction: &Vector3<f64>) -> (Radian, Radian) {
    let dec = direction.y.clamp(-1.0, 1.0).asin();
    (normalize_angle(direction.z.atan2(direction.x)), dec)
}

/// Right ascension and declination of a Cartesian position (Z polar axis).
///
/// `ra = atan2(Y, X)` normalized into [0, 2π), `dec = asin(Z / |r|)`; both are zero for a null vector.
pub fn radec_from_cartesian(position: &Vector3<f64>) -> (Radian, Radian) {
    let norm = position.norm();
    if norm == 0.0 {
        return (0.0, 0.0);
    }
    let ra = normalize_angle(position.y.atan2(position.x));
    let dec = (position.z / norm).clamp(-1.0, 1.0).asin();
    (ra, dec)
}

/// Unit vector along `v`, or the fixed X unit vector when `v` has zero length.
pub fn unit_or_default(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector3::x)
}

/// Reduce an angle into [0, 2π).
pub fn normalize_angle(angle: Radian) -> Radian {
    let a = angle.rem_euclid(DPI);
    if a >= DPI {
        a - DPI
    } else {
        a
    }
}
