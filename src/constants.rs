//! # Constants and type definitions
//!
//! Physical constants, unit conversions and the small type aliases shared by the
//! Horizons ingestion pipeline (header scan, row readers, frame correction and track).

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Radius (km) used on every axis when a file carries no usable body figure
pub const DEFAULT_BODY_RADIUS: Kilometer = 1000.0;

/// Smallest time difference (seconds) used as an interpolation denominator
pub const TIME_EPS: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;

/// Triaxial ellipsoid radii `(a, b, c)` in kilometers
pub type Radii = Vector3<Kilometer>;
