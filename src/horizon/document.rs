//! # Parsed Horizons report
//!
//! [`EphemerisDocument`] is the immutable result of one import. Parsing runs in two phases:
//!
//! 1. [`scan_header`] reads every line once and produces a plain [`HeaderMetadata`], which
//!    includes the [`FormatKind`] of the data rows;
//! 2. the matching row reader turns the data lines into [`Entry`] values:
//!    - [`FormatKind::AngularAstrometric`] → [`read_angular_entries`] over the `$$SOE` block,
//!      or over every non-header line when the report has no `$$SOE` marker,
//!    - [`FormatKind::CartesianStateVector`] → [`read_state_vector_entries`].
//!
//! Only a missing target or center name makes an import fail; malformed rows are skipped.
//! Importing the same text twice yields equal documents.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use hifitime::Epoch;
use log::info;
use nalgebra::Vector3;

use super::angular_reader::read_angular_entries;
use super::header::{recognize, scan_header, FormatKind, HeaderMetadata};
use super::soe_block;
use super::vector_reader::read_state_vector_entries;
use crate::constants::{AstronomicalUnit, Radian, Radii};
use crate::ephem_errors::EphemError;
use crate::import_params::ImportParams;
use crate::observers::ObserverSite;
use crate::track::EphemerisTrack;

/// One sample of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub time_utc: Epoch,
    /// Right ascension in [0, 2π).
    pub right_ascension: Radian,
    pub declination: Radian,
    pub range_au: AstronomicalUnit,
    /// Unit vector toward the target.
    pub direction: Vector3<f64>,
    pub position_km: Vector3<f64>,
    /// Zero for angular rows.
    pub velocity_km_s: Vector3<f64>,
}

impl Entry {
    /// Entry with a zero velocity, as produced by the angular reader.
    pub fn at_rest(
        time_utc: Epoch,
        right_ascension: Radian,
        declination: Radian,
        range_au: AstronomicalUnit,
        direction: Vector3<f64>,
        position_km: Vector3<f64>,
    ) -> Self {
        Entry {
            time_utc,
            right_ascension,
            declination,
            range_au,
            direction,
            position_km,
            velocity_km_s: Vector3::zeros(),
        }
    }
}

/// A parsed Horizons report: header metadata plus the entries in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisDocument {
    header: HeaderMetadata,
    entries: Vec<Entry>,
}

impl EphemerisDocument {
    /// Read and parse a report file.
    ///
    /// Arguments
    /// ---------
    /// * `path`: path of the text report
    /// * `params`: import parameters
    ///
    /// Return
    /// ------
    /// * the parsed document
    /// * [`EphemError::FileUnreadable`] when the file cannot be read, or any error of
    ///   [`EphemerisDocument::parse_str`]
    pub fn read_file(path: &Utf8Path, params: &ImportParams) -> Result<Self, EphemError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| EphemError::FileUnreadable {
                path: path.to_string(),
                source,
            })?;
        let document = Self::parse_str(&content, params)?;
        info!(
            "{path}: {} entries for {} seen from {}",
            document.entries.len(),
            document.header.target_name,
            document.header.center_name
        );
        Ok(document)
    }

    /// Parse the text of a report.
    ///
    /// Arguments
    /// ---------
    /// * `content`: the full report text
    /// * `params`: import parameters
    ///
    /// Return
    /// ------
    /// * the parsed document, or [`EphemError::MissingHeaderField`] when the target or center
    ///   name is absent
    pub fn parse_str(content: &str, params: &ImportParams) -> Result<Self, EphemError> {
        let lines: Vec<&str> = content.lines().collect();
        let header = scan_header(&lines, params.default_radius_km)?;

        let entries = match header.format_kind {
            FormatKind::AngularAstrometric => {
                let body: Vec<&str> = match soe_block(&lines) {
                    Some(block) => block.to_vec(),
                    None => lines
                        .iter()
                        .copied()
                        .filter(|line| recognize(line).is_none())
                        .collect(),
                };
                read_angular_entries(&body, &header, params)
            }
            FormatKind::CartesianStateVector => read_state_vector_entries(&lines, params),
        };

        Ok(EphemerisDocument { header, entries })
    }

    pub fn header(&self) -> &HeaderMetadata {
        &self.header
    }

    pub fn target_name(&self) -> &str {
        &self.header.target_name
    }

    pub fn center_name(&self) -> &str {
        &self.header.center_name
    }

    pub fn target_id(&self) -> Option<i64> {
        self.header.target_id
    }

    pub fn center_id(&self) -> Option<i64> {
        self.header.center_id
    }

    pub fn reference_frame(&self) -> Option<&str> {
        self.header.reference_frame.as_deref()
    }

    pub fn target_radii(&self) -> Radii {
        self.header.target_radii
    }

    pub fn center_radii(&self) -> Radii {
        self.header.center_radii
    }

    pub fn is_topocentric(&self) -> bool {
        self.header.is_topocentric
    }

    pub fn observer_site(&self) -> Option<&ObserverSite> {
        self.header.observer_site.as_ref()
    }

    pub fn format_kind(&self) -> FormatKind {
        self.header.format_kind
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Time-ordered, queryable view of the entries.
    pub fn track(&self) -> EphemerisTrack {
        EphemerisTrack::from_document(self)
    }
}

impl FromStr for EphemerisDocument {
    type Err = EphemError;

    /// Parse a report with [`ImportParams::default`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s, &ImportParams::default())
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKind::AngularAstrometric => write!(f, "angular (RA/DEC/range)"),
            FormatKind::CartesianStateVector => write!(f, "cartesian state vectors"),
        }
    }
}
