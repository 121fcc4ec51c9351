//! # Observer site geometry
//!
//! A Horizons report produced for a surface site (topocentric report) describes the site in
//! its header with two independent lines:
//!
//! ```text
//! Center geodetic : 243.140220, 33.3562557, 1.6877800  {E-lon(deg),Lat(deg),Alt(km)}
//! Center cylindric: 243.140220, 5335.43579, 3484.89620 {E-lon(deg),Dxy(km),Dz(km)}
//! ```
//!
//! [`ObserverSite`] keeps both (each optional, the header may omit either of them) plus the
//! site name. Only the cylindrical form is used to move an observation to the body center:
//! see [`topocentric`] for the correction itself.
//!
//! ## Frames & conventions
//!
//! - **Body-fixed**: `(ρ·cos λ, ρ·sin λ, z)` built from the cylindrical line, Z along the spin axis.
//! - **Inertial**: the body-fixed vector turned by the Greenwich mean sidereal time
//!   ([`crate::time::gmst`]) about Z.
//!
//! ## Units
//!
//! - Longitudes and latitudes: **degrees** (east positive).
//! - Altitude, radial and axial offsets: **kilometers**.

pub mod topocentric;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::{Degree, Kilometer};
use crate::ref_system::{rotmt, Axis};
use crate::time::gmst;

/// Geodetic coordinates of a site, as printed on the `Center geodetic` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticCoord {
    /// East longitude in degrees.
    pub longitude: Degree,
    /// Geodetic latitude in degrees.
    pub latitude: Degree,
    /// Altitude above the reference ellipsoid in kilometers.
    pub altitude: Kilometer,
}

/// Cylindrical geocentric coordinates of a site, as printed on the `Center cylindric` line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalCoord {
    /// East longitude in degrees.
    pub longitude: Degree,
    /// Distance from the spin axis in kilometers.
    pub radial: Kilometer,
    /// Distance from the equatorial plane along the spin axis in kilometers.
    pub axial: Kilometer,
}

impl CylindricalCoord {
    /// Position of the site in the body-fixed frame: `(ρ·cos λ, ρ·sin λ, z)` in kilometers.
    pub fn body_fixed_position(&self) -> Vector3<f64> {
        let lon = self.longitude.to_radians();
        Vector3::new(
            self.radial * lon.cos(),
            self.radial * lon.sin(),
            self.axial,
        )
    }

    /// Position of the site in the non-rotating frame at `epoch`, in kilometers.
    ///
    /// The body-fixed position is expressed in a frame rotated about Z by `-GMST`.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: the UTC instant at which the site position is required
    ///
    /// Return
    /// ------
    /// * the inertial site vector in kilometers
    pub fn inertial_position(&self, epoch: &Epoch) -> Vector3<f64> {
        rotmt(-gmst(epoch), Axis::Z) * self.body_fixed_position()
    }
}

/// An observing site declared by a `Center-site name:` header line.
///
/// Both coordinate forms are optional: a header may declare the site and print only one of
/// them, or none.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObserverSite {
    pub name: Option<String>,
    pub geodetic: Option<GeodeticCoord>,
    pub cylindrical: Option<CylindricalCoord>,
}

impl ObserverSite {
    /// Inertial position of the site at `epoch`, if the cylindrical coordinates are known.
    pub fn inertial_position(&self, epoch: &Epoch) -> Option<Vector3<f64>> {
        self.cylindrical.map(|cyl| cyl.inertial_position(epoch))
    }
}
