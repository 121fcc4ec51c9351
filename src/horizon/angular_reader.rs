//! Reader for observer tables (RA/DEC rows).
//!
//! A data row looks like
//!
//! ```text
//!  2024-Jan-01 00:00 *m  18 46 44.65 -23 09 30.1   -3.944   1.383  1.31262213046298 -4.7034770
//! ```
//!
//! Two strategies are tried, in order, on the text following the timestamp:
//!
//! 1. **Token layout**: with at least nine numeric tokens, tokens 0–2 are the RA (h m s),
//!    tokens 3–5 the DEC (d m s, sign read from the text of token 3) and token 8 the range.
//! 2. **Combined pattern**: an `hh mm ss.s ±dd mm ss.s` group anywhere after the timestamp, followed
//!    by the range as the third numeric token after the group.
//!
//! Rows matching neither are skipped. Skipped rows never abort the import.

use std::sync::LazyLock;

use hifitime::Epoch;
use log::{debug, warn};
use regex::Regex;

use super::document::Entry;
use super::header::HeaderMetadata;
use crate::constants::{AstronomicalUnit, Kilometer, Radian};
use crate::conversion::{direction_from_radec, dms_to_rad, hms_to_rad, radec_from_direction};
use crate::ephem_errors::{EphemError, ParseRowError};
use crate::import_params::{ImportParams, UndatedRowPolicy};
use crate::observers::topocentric::topocentric_to_geocentric;
use crate::observers::CylindricalCoord;
use crate::time::{parse_calendar_utc, sentinel_epoch};
use crate::tokenizer::{leading_date_time, numeric_tokens_from};

static COMBINED_RADEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?P<rh>\d{1,2})\s+(?P<rm>\d{1,2})\s+(?P<rs>\d{1,2}(?:\.\d*)?)\s+(?P<sign>[-+]?)(?P<dd>\d{1,2})\s+(?P<dm>\d{1,2})\s+(?P<ds>\d{1,2}(?:\.\d*)?)(?:\s|$)",
    )
    .expect("valid RA/DEC regex")
});

/// Minimum number of numeric tokens for the token layout (RA ×3, DEC ×3, two skipped, range).
const TOKEN_LAYOUT_MIN: usize = 9;
const RANGE_TOKEN: usize = 8;
/// Position of the range among the numeric tokens following a combined RA/DEC group.
const RANGE_AFTER_COMBINED: usize = 2;

/// One parsed observer-table row.
#[derive(Debug, Clone, PartialEq)]
pub struct AngularRow {
    /// `None` when the timestamp is absent or unreadable.
    pub time: Option<Epoch>,
    pub right_ascension: Radian,
    pub declination: Radian,
    pub range_au: AstronomicalUnit,
}

/// Blank lines, `$$` markers, `*` separators and column-title lines carry no data.
fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with("$$")
        || trimmed.starts_with('*')
        || trimmed.starts_with("Date")
}

fn finite(value: f64, field: &'static str) -> Result<f64, ParseRowError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseRowError::NonFiniteValue(field))
    }
}

/// RA, DEC and range read with the combined pattern from byte offset `from`.
fn combined_radec(line: &str, from: usize) -> Result<(Radian, Radian, f64), ParseRowError> {
    let tail = line.get(from..).unwrap_or_default();
    let caps = COMBINED_RADEC
        .captures(tail)
        .ok_or_else(|| ParseRowError::NoAngularFields(line.trim().to_string()))?;

    let field = |name: &str| -> f64 {
        caps.name(name)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(f64::NAN)
    };
    let negative = caps.name("sign").is_some_and(|m| m.as_str() == "-");

    let ra = hms_to_rad(field("rh"), field("rm"), field("rs"));
    let dec = dms_to_rad(negative, field("dd"), field("dm"), field("ds"));

    let group_end = caps.get(0).map_or(tail.len(), |m| m.end());
    let range = numeric_tokens_from(line, from + group_end)
        .get(RANGE_AFTER_COMBINED)
        .map(|token| token.value)
        .ok_or_else(|| ParseRowError::MissingRange(line.trim().to_string()))?;

    Ok((ra, dec, range))
}

/// Parse one observer-table row.
///
/// An unreadable timestamp does not reject the row: it is logged and the row is returned with
/// `time = None`.
///
/// Arguments
/// ---------
/// * `line`: the raw data line
///
/// Return
/// ------
/// * the parsed row, or the reason why no RA/DEC/range could be read
pub fn parse_angular_row(line: &str) -> Result<AngularRow, ParseRowError> {
    let (time, from) = match leading_date_time(line) {
        Some(stamp) => {
            let time = parse_calendar_utc(stamp.date, stamp.time)
                .map_err(|err| warn!("{err}, row kept without timestamp"))
                .ok();
            (time, stamp.end)
        }
        None => (None, 0),
    };

    let tokens = numeric_tokens_from(line, from);
    let (ra, dec, range) = if tokens.len() >= TOKEN_LAYOUT_MIN {
        (
            hms_to_rad(tokens[0].value, tokens[1].value, tokens[2].value),
            dms_to_rad(tokens[3].negative, tokens[3].value, tokens[4].value, tokens[5].value),
            tokens[RANGE_TOKEN].value,
        )
    } else {
        combined_radec(line, from)?
    };

    Ok(AngularRow {
        time,
        right_ascension: finite(ra, "right_ascension")?,
        declination: finite(dec, "declination")?,
        range_au: finite(range, "range")?,
    })
}

/// Build the entry of a row stamped `time`.
///
/// With `site`, the row is moved to the body center and RA/DEC are re-derived from the
/// corrected direction.
fn angular_entry(
    row: &AngularRow,
    time: Epoch,
    site: Option<&CylindricalCoord>,
    km_per_au: Kilometer,
) -> Entry {
    let direction = direction_from_radec(row.right_ascension, row.declination);

    match site {
        Some(site) => {
            let geo = topocentric_to_geocentric(&direction, row.range_au, &time, site, km_per_au);
            let (ra, dec) = radec_from_direction(&geo.direction);
            Entry::at_rest(time, ra, dec, geo.range_au, geo.direction, geo.position_km)
        }
        None => Entry::at_rest(
            time,
            row.right_ascension,
            row.declination,
            row.range_au,
            direction,
            direction * (row.range_au * km_per_au),
        ),
    }
}

/// Read the entries of an observer table.
///
/// Arguments
/// ---------
/// * `body`: the candidate data lines (see [`super::document::EphemerisDocument::parse_str`])
/// * `header`: the report metadata, used for the topocentric correction
/// * `params`: import parameters
///
/// Return
/// ------
/// * the entries in file order
pub fn read_angular_entries(
    body: &[&str],
    header: &HeaderMetadata,
    params: &ImportParams,
) -> Vec<Entry> {
    let site = if params.topocentric_correction && header.is_topocentric {
        header.observer_site.as_ref().and_then(|site| site.cylindrical)
    } else {
        None
    };
    if params.topocentric_correction && header.is_topocentric && site.is_none() {
        warn!("topocentric report without cylindrical site coordinates, rows kept uncorrected");
    }

    body.iter()
        .filter(|line| !is_skippable(line))
        .filter_map(|line| {
            parse_angular_row(line)
                .map_err(|err| debug!("skipping row, {}", EphemError::from(err)))
                .ok()
        })
        .filter_map(|row| {
            let time = match (row.time, params.undated_rows) {
                (Some(time), _) => time,
                (None, UndatedRowPolicy::KeepWithSentinel) => sentinel_epoch(),
                (None, UndatedRowPolicy::Skip) => {
                    debug!("skipping row without usable timestamp");
                    return None;
                }
            };
            // the sentinel is not a real instant: no sidereal rotation for undated rows
            let site = row.time.and(site.as_ref());
            Some(angular_entry(&row, time, site, params.km_per_au))
        })
        .collect()
}

#[cfg(test)]
mod angular_reader_test {
    use super::*;
    use crate::constants::{Radii, AU};
    use crate::horizon::header::FormatKind;
    use crate::observers::ObserverSite;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    fn geocentric_header() -> HeaderMetadata {
        HeaderMetadata {
            target_name: "Venus (299)".into(),
            target_id: Some(299),
            center_name: "Earth (399)".into(),
            center_id: Some(399),
            target_radii: Radii::repeat(6051.8),
            center_radii: Radii::repeat(1000.0),
            is_topocentric: false,
            observer_site: None,
            format_kind: FormatKind::AngularAstrometric,
            reference_frame: None,
        }
    }

    fn topocentric_header() -> HeaderMetadata {
        HeaderMetadata {
            is_topocentric: true,
            observer_site: Some(ObserverSite {
                name: Some("Palomar".into()),
                geodetic: None,
                cylindrical: Some(CylindricalCoord {
                    longitude: 243.140220,
                    radial: 5335.43579,
                    axial: 3484.89620,
                }),
            }),
            ..geocentric_header()
        }
    }

    #[test]
    fn test_token_layout() {
        let row = parse_angular_row(
            " 2024-Jan-01 00:00 *m  18 46 44.65 -23 09 30.1   -3.944   1.383  1.31262213046298 -4.7034770",
        )
        .unwrap();
        assert_eq!(row.time, Some(Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0)));
        assert_abs_diff_eq!(
            row.right_ascension,
            hms_to_rad(18.0, 46.0, 44.65),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            row.declination,
            -(23.0 + 9.0 / 60.0 + 30.1 / 3600.0_f64).to_radians(),
            epsilon = 1e-15
        );
        assert_eq!(row.range_au, 1.31262213046298);
    }

    #[test]
    fn test_negative_zero_declination() {
        let row = parse_angular_row(
            " 2024-Jan-01 00:00     06 00 00.00 -00 30 00.0   -3.944   1.383  2.0 0.0",
        )
        .unwrap();
        assert_abs_diff_eq!(row.declination, -(0.5_f64.to_radians()), epsilon = 1e-15);
    }

    #[test]
    fn test_combined_pattern_fallback() {
        // only seven numeric tokens after the timestamp
        let err =
            parse_angular_row(" 2024-Jan-01 00:00  12 00 00.0 +45 00 00.0 /T 3.5").unwrap_err();
        assert!(matches!(err, ParseRowError::MissingRange(_)));

        let (ra, dec, range) =
            combined_radec("flag 12 00 00.0 +45 00 00.0 0.1 0.2 3.5 n.a.", 0).unwrap();
        assert_abs_diff_eq!(ra, std::f64::consts::PI, epsilon = 1e-15);
        assert_abs_diff_eq!(dec, 45.0_f64.to_radians(), epsilon = 1e-15);
        assert_eq!(range, 3.5);
    }

    #[test]
    fn test_row_without_angles() {
        assert!(matches!(
            parse_angular_row(" 2024-Jan-01 00:00  n.a. n.a."),
            Err(ParseRowError::NoAngularFields(_))
        ));
    }

    #[test]
    fn test_unreadable_date_kept_as_none() {
        let row = parse_angular_row(
            " 2024-Xyz-01 00:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0 0.0",
        )
        .unwrap();
        assert!(row.time.is_none());
        assert_eq!(row.range_au, 1.0);
    }

    #[test]
    fn test_read_entries_geocentric() {
        let body = [
            "Date__(UT)__HR:MN     R.A._____(ICRF)_____DEC    APmag   S-brt   delta   deldot",
            "**********************************************************************",
            " 2024-Jan-01 00:00     06 00 00.00 +00 00 00.0   -3.944   1.383  2.0 0.0",
            "",
            " 2024-Jan-01 01:00     garbage",
        ];
        let entries = read_angular_entries(&body, &geocentric_header(), &ImportParams::default());
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        // RA = 6h, Y-polar layout: direction along +Z
        assert_abs_diff_eq!(entry.direction, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(entry.position_km, Vector3::new(0.0, 0.0, 2.0 * AU), epsilon = 1e-6);
        assert_eq!(entry.velocity_km_s, Vector3::zeros());
        assert_eq!(entry.range_au, 2.0);
    }

    #[test]
    fn test_undated_row_policy() {
        let body = [" 2024-Xyz-01 00:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0 0.0"];

        let skipped = read_angular_entries(&body, &geocentric_header(), &ImportParams::default());
        assert!(skipped.is_empty());

        let params = ImportParams::builder()
            .undated_rows(UndatedRowPolicy::KeepWithSentinel)
            .build()
            .unwrap();
        let kept = read_angular_entries(&body, &topocentric_header(), &params);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].time_utc, sentinel_epoch());
        // undated rows are never corrected
        assert_eq!(kept[0].range_au, 1.0);
    }

    #[test]
    fn test_topocentric_correction() {
        let body = [" 2024-Jan-01 06:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0 0.0"];
        let header = topocentric_header();
        let time = Epoch::from_gregorian_utc_hms(2024, 1, 1, 6, 0, 0);

        let entries = read_angular_entries(&body, &header, &ImportParams::default());
        let site = header.observer_site.unwrap().cylindrical.unwrap();
        let expected = Vector3::new(AU, 0.0, 0.0) + site.inertial_position(&time);

        let entry = &entries[0];
        assert_abs_diff_eq!(entry.position_km, expected, epsilon = 1e-6);
        assert_abs_diff_eq!(entry.range_au, expected.norm() / AU, epsilon = 1e-15);
        assert_abs_diff_eq!(entry.direction.norm(), 1.0, epsilon = 1e-12);

        let (ra, dec) = radec_from_direction(&entry.direction);
        assert_abs_diff_eq!(entry.right_ascension, ra, epsilon = 1e-15);
        assert_abs_diff_eq!(entry.declination, dec, epsilon = 1e-15);
        assert!(entry.right_ascension != 0.0 || entry.declination != 0.0);
    }

    #[test]
    fn test_topocentric_correction_disabled() {
        let body = [" 2024-Jan-01 06:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0 0.0"];
        let params = ImportParams::builder()
            .topocentric_correction(false)
            .build()
            .unwrap();
        let entries = read_angular_entries(&body, &topocentric_header(), &params);
        assert_abs_diff_eq!(entries[0].position_km, Vector3::new(AU, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(entries[0].range_au, 1.0);
    }
}
