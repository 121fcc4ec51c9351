//! Topocentric → geocentric correction of angular observations.
//!
//! A topocentric row gives the direction and range of the target as seen from the site.
//! Adding the inertial site vector (see [`CylindricalCoord::inertial_position`]) to the
//! topocentric position vector gives the position as seen from the body center:
//!
//! ```text
//! r_geo = d̂·ρ·km_per_au + R_z(-GMST)·(ρ_xy·cos λ, ρ_xy·sin λ, z)
//! ```
//!
//! The range and direction of the entry are then re-derived from `r_geo`. The correction is
//! only applied when a timestamp and the cylindrical site coordinates are both available; the
//! caller falls back to the plain `direction × range` position otherwise.

use hifitime::Epoch;
use nalgebra::Vector3;

use super::CylindricalCoord;
use crate::constants::{AstronomicalUnit, Kilometer};
use crate::conversion::unit_or_default;

/// Position of an angular sample after the move to the body center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricState {
    /// Unit vector toward the target from the body center.
    pub direction: Vector3<f64>,
    /// Distance from the body center in astronomical units.
    pub range_au: AstronomicalUnit,
    /// Position from the body center in kilometers.
    pub position_km: Vector3<f64>,
}

/// Move a topocentric sample to the body center.
///
/// Arguments
/// ---------
/// * `direction`: unit vector toward the target as seen from the site
/// * `range_au`: site-target distance in astronomical units
/// * `epoch`: UTC instant of the sample
/// * `site`: cylindrical coordinates of the site
/// * `km_per_au`: kilometers per astronomical unit
///
/// Return
/// ------
/// * the geocentric direction, range and position of the sample
pub fn topocentric_to_geocentric(
    direction: &Vector3<f64>,
    range_au: AstronomicalUnit,
    epoch: &Epoch,
    site: &CylindricalCoord,
    km_per_au: Kilometer,
) -> GeocentricState {
    let topocentric_km = direction * (range_au * km_per_au);
    let position_km = topocentric_km + site.inertial_position(epoch);
    let norm = position_km.norm();

    GeocentricState {
        direction: unit_or_default(&position_km),
        range_au: norm / km_per_au,
        position_km,
    }
}
