//! # JPL Horizons text reports
//!
//! Reader for the plain-text ephemeris reports produced by the JPL Horizons service.
//!
//! A report is a free-form header followed by data rows in one of two layouts:
//!
//! - **Observer tables** ([`header::FormatKind::AngularAstrometric`]): one row per epoch with
//!   a calendar timestamp, sexagesimal RA/DEC and the observer-target range (AU).
//!   See [`angular_reader`].
//! - **Vector tables** ([`header::FormatKind::CartesianStateVector`]): three-line records
//!   (epoch, `X Y Z`, `VX VY VZ` in km and km/s) between the `$$SOE` and `$$EOE` markers.
//!   See [`vector_reader`].
//!
//! The header is scanned first (see [`header`]); it decides the layout and, for topocentric
//! reports, provides the observing site used to move angular rows to the body center.
//! [`document::EphemerisDocument`] ties the pieces together.
//!
//! ## Example
//!
//! ```rust
//! use horizons_track::horizon::document::EphemerisDocument;
//!
//! let report = "\
//! Target body name: Venus (299)
//! Center body name: Earth (399)
//! $$SOE
//!  2024-Jan-01 00:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0000000000 0.0
//!  2024-Jan-01 01:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0000000000 0.0
//! $$EOE
//! ";
//! let document: EphemerisDocument = report.parse().unwrap();
//! assert_eq!(document.entries().len(), 2);
//! ```

pub mod angular_reader;
pub mod display;
pub mod document;
pub mod header;
pub mod vector_reader;

const START_OF_EPHEMERIS: &str = "$$SOE";
const END_OF_EPHEMERIS: &str = "$$EOE";

/// Lines strictly between the first `$$SOE` marker and the following `$$EOE`.
///
/// A missing `$$EOE` extends the block to the end of the report. Returns `None` when the
/// report has no `$$SOE` marker.
pub(crate) fn soe_block<'a, 'b>(lines: &'b [&'a str]) -> Option<&'b [&'a str]> {
    let start = lines
        .iter()
        .position(|line| line.trim() == START_OF_EPHEMERIS)?
        + 1;
    let len = lines[start..]
        .iter()
        .position(|line| line.trim() == END_OF_EPHEMERIS)
        .unwrap_or(lines.len() - start);
    Some(&lines[start..start + len])
}

#[cfg(test)]
mod horizon_test {
    use super::*;

    #[test]
    fn test_soe_block() {
        let lines = ["header", "$$SOE", "a", "b", "$$EOE", "footer"];
        assert_eq!(soe_block(&lines), Some(&lines[2..4]));

        let lines = ["header", "  $$SOE  ", "a"];
        assert_eq!(soe_block(&lines), Some(&lines[2..]));

        let lines = ["header", "$$SOE"];
        assert_eq!(soe_block(&lines), Some(&lines[2..]));

        let lines = ["header", "a"];
        assert_eq!(soe_block(&lines), None);
    }
}
