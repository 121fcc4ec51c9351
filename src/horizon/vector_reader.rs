//! Reader for vector tables (`GEOMETRIC cartesian states`).
//!
//! Records live between `$$SOE` and `$$EOE` and span three lines:
//!
//! ```text
//! 2460310.500000000 = A.D. 2024-Jan-01 00:00:00.0000 TDB
//!  X =-2.649903367743050E+07 Y = 1.327574173547878E+08 Z = 5.755671839918904E+07
//!  VX=-2.979426006719171E+01 VY=-5.018052460117524E+00 VZ=-2.175393905034988E+00
//!  LT= 4.974001685845293E+02 RG= 1.491163599021768E+08 RR=-2.208716289306002E-02
//! ```
//!
//! Anything after the velocity line (light time, range, range rate) is ignored. A window of
//! three lines that does not have this shape is skipped one line at a time until the next
//! record lines up.

use std::sync::LazyLock;

use hifitime::Epoch;
use log::{debug, warn};
use nalgebra::Vector3;
use regex::Regex;

use super::document::Entry;
use super::soe_block;
use crate::constants::Kilometer;
use crate::conversion::{radec_from_cartesian, unit_or_default};
use crate::ephem_errors::{EphemError, ParseRowError};
use crate::import_params::ImportParams;
use crate::time::{parse_stamp_utc, sentinel_epoch};

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

static START_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<jd>\d+(?:\.\d*)?)\s*=\s*(?:A\.D\.\s*)?(?P<stamp>\S+\s+\S+)")
        .expect("valid record start regex")
});

static POSITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*X\s*=\s*(?P<x>{NUMBER})\s*Y\s*=\s*(?P<y>{NUMBER})\s*Z\s*=\s*(?P<z>{NUMBER})"
    ))
    .expect("valid position regex")
});

static VELOCITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*VX\s*=\s*(?P<x>{NUMBER})\s*VY\s*=\s*(?P<y>{NUMBER})\s*VZ\s*=\s*(?P<z>{NUMBER})"
    ))
    .expect("valid velocity regex")
});

/// One three-line record.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVectorRecord {
    pub time: Epoch,
    /// Position in kilometers.
    pub position: Vector3<f64>,
    /// Velocity in kilometers per second.
    pub velocity: Vector3<f64>,
}

/// `x`, `y`, `z` captures of a position or velocity line.
fn vector_line(re: &Regex, line: &str) -> Option<Vector3<f64>> {
    let caps = re.captures(line)?;
    let component = |name: &str| caps.name(name)?.as_str().parse::<f64>().ok();
    Some(Vector3::new(
        component("x")?,
        component("y")?,
        component("z")?,
    ))
}

/// Parse one record from its three lines.
///
/// An unreadable timestamp is replaced by [`sentinel_epoch`]; only the shape of the three
/// lines decides whether the record is accepted.
///
/// Arguments
/// ---------
/// * `start`, `position`, `velocity`: three consecutive lines of the `$$SOE` block
///
/// Return
/// ------
/// * the record, or [`ParseRowError::IncompleteStateVector`] when a line has the wrong shape
pub fn parse_record(
    start: &str,
    position: &str,
    velocity: &str,
) -> Result<StateVectorRecord, ParseRowError> {
    let incomplete = || ParseRowError::IncompleteStateVector(start.trim().to_string());

    let stamp = START_LINE
        .captures(start)
        .and_then(|caps| caps.name("stamp"))
        .ok_or_else(incomplete)?
        .as_str();
    let position = vector_line(&POSITION_LINE, position).ok_or_else(incomplete)?;
    let velocity = vector_line(&VELOCITY_LINE, velocity).ok_or_else(incomplete)?;

    if !position.iter().all(|v| v.is_finite()) {
        return Err(ParseRowError::NonFiniteValue("position"));
    }
    if !velocity.iter().all(|v| v.is_finite()) {
        return Err(ParseRowError::NonFiniteValue("velocity"));
    }

    let time = parse_stamp_utc(stamp).unwrap_or_else(|err| {
        warn!("{err}, record stamped with the sentinel epoch");
        sentinel_epoch()
    });

    Ok(StateVectorRecord {
        time,
        position,
        velocity,
    })
}

/// Entry of a record: range, direction and RA/DEC derived from the position.
fn vector_entry(record: StateVectorRecord, km_per_au: Kilometer) -> Entry {
    let (ra, dec) = radec_from_cartesian(&record.position);
    Entry {
        time_utc: record.time,
        right_ascension: ra,
        declination: dec,
        range_au: record.position.norm() / km_per_au,
        direction: unit_or_default(&record.position),
        position_km: record.position,
        velocity_km_s: record.velocity,
    }
}

/// Read the entries of a vector table.
///
/// Arguments
/// ---------
/// * `lines`: every line of the report
/// * `params`: import parameters
///
/// Return
/// ------
/// * the entries in file order, empty when the report has no `$$SOE` block
pub fn read_state_vector_entries(lines: &[&str], params: &ImportParams) -> Vec<Entry> {
    let Some(block) = soe_block(lines) else {
        warn!("vector table without $$SOE marker, no state read");
        return Vec::new();
    };

    let mut entries = Vec::new();
    let mut i = 0;
    while i < block.len() {
        let record = match block.get(i..i + 3) {
            Some([start, position, velocity]) => parse_record(start, position, velocity),
            _ => Err(ParseRowError::IncompleteStateVector(
                block[i].trim().to_string(),
            )),
        };

        match record {
            Ok(record) => {
                entries.push(vector_entry(record, params.km_per_au));
                i += 3;
            }
            Err(err) => {
                if START_LINE.is_match(block[i]) {
                    debug!("skipping record, {}", EphemError::from(err));
                }
                i += 1;
            }
        }
    }
    entries
}
