use chrono::{Datelike, NaiveDateTime, Timelike};
use hifitime::Epoch;

use crate::constants::{Radian, DAYS_PER_JULIAN_CENTURY, DPI, J2000_JD};
use crate::ephem_errors::EphemError;

/// Calendar layout with fractional seconds, e.g. `2024-Jan-01 00:00:00.0000`
const PRIMARY_FORMAT: &str = "%Y-%b-%d %H:%M:%S%.f";

/// Coarser calendar layout without seconds, e.g. `2024-Jan-01 00:00`
const COARSE_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Epoch substituted for timestamps that cannot be read: 1970-01-01T00:00:00 UTC.
pub fn sentinel_epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(1970, 1, 1)
}

/// Parse a Horizons calendar timestamp into a UTC [`Epoch`].
///
/// The primary layout `YYYY-Mon-DD HH:MM:SS[.fff]` is tried first, then the coarser
/// `YYYY-Mon-DD HH:MM` layout.
///
/// Arguments
/// ---------
/// * `date`: the date token, e.g. `2024-Jan-01`
/// * `time`: the time token, e.g. `13:45` or `13:45:10.5000`
///
/// Return
/// ------
/// * the UTC epoch, or [`EphemError::DateParseFailure`] when neither layout applies
pub fn parse_calendar_utc(date: &str, time: &str) -> Result<Epoch, EphemError> {
    let stamp = format!("{} {}", date.trim(), time.trim());

    let civil = NaiveDateTime::parse_from_str(&stamp, PRIMARY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&stamp, COARSE_FORMAT))
        .map_err(|_| EphemError::DateParseFailure(stamp.clone()))?;

    // chrono encodes a leap second as nanoseconds >= 1e9
    let nanos = civil.nanosecond().min(999_999_999);

    Epoch::maybe_from_gregorian_utc(
        civil.year(),
        civil.month() as u8,
        civil.day() as u8,
        civil.hour() as u8,
        civil.minute() as u8,
        civil.second() as u8,
        nanos,
    )
    .map_err(|_| EphemError::DateParseFailure(stamp))
}

/// Split a `date time` stamp on whitespace and parse it with [`parse_calendar_utc`].
pub fn parse_stamp_utc(stamp: &str) -> Result<Epoch, EphemError> {
    let mut parts = stamp.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(date), Some(time)) => parse_calendar_utc(date, time),
        _ => Err(EphemError::DateParseFailure(stamp.to_string())),
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians for a UTC epoch.
///
/// Uses the Julian-date polynomial
///
/// ```text
/// θ = 280.46061837 + 360.98564736629·(JD − 2451545) + 0.000387933·T² − T³/38710000   [deg]
/// ```
///
/// where `T` is the number of Julian centuries elapsed since J2000.0.
///
/// Arguments
/// ---------
/// * `epoch`: the instant of the observation, read on the UTC scale
///
/// Return
/// ------
/// * GMST angle in radians, normalized to the interval [0, 2π).
pub fn gmst(epoch: &Epoch) -> Radian {
    let d = epoch.to_jde_utc_days() - J2000_JD;
    let t = d / DAYS_PER_JULIAN_CENTURY;

    let theta_deg = 280.46061837 + 360.98564736629 * d + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;

    let theta = theta_deg.rem_euclid(360.0).to_radians();

    // rem_euclid may round up to the modulus itself
    if theta >= DPI {
        theta - DPI
    } else {
        theta
    }
}
