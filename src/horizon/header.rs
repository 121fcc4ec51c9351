//! Header extraction for Horizons text reports.
//!
//! The header is read in one linear pass. Each line is offered to a fixed, ordered set of
//! recognizers keyed on the literal prefix of the line (after leading blanks):
//!
//! | Prefix                          | Field                                      |
//! |---------------------------------|--------------------------------------------|
//! | `Target body name:`             | target name (and numeric id)               |
//! | `Center body name:`             | center name (and numeric id)               |
//! | `Target radii :`                | explicit target ellipsoid                  |
//! | `Center radii :`                | explicit center ellipsoid                  |
//! | `Equ. radius, km =`             | target equatorial figure (fallback)        |
//! | `Polar axis, km =`              | target polar figure (fallback)             |
//! | `Center-site name:`             | observing site declaration                 |
//! | `Center geodetic :`             | site longitude, latitude, altitude         |
//! | `Center cylindric:`             | site longitude, radial and axial offsets   |
//! | `Reference frame :`             | reference frame label                      |
//! | `... GEOMETRIC cartesian states`| state-vector row format                    |
//!
//! Any other line is ignored, which keeps the scan tolerant to header lines added by newer
//! versions of the service.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{Kilometer, Radii};
use crate::ephem_errors::EphemError;
use crate::observers::{CylindricalCoord, GeodeticCoord, ObserverSite};
use crate::tokenizer::numeric_tokens;

/// Layout of the data rows of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Observer table: RA/DEC (sexagesimal) and range per row.
    AngularAstrometric,
    /// Vector table: three-line `X/Y/Z`, `VX/VY/VZ` records between `$$SOE` and `$$EOE`.
    CartesianStateVector,
}

/// Metadata extracted from the header of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMetadata {
    pub target_name: String,
    /// Numeric body id printed in parentheses after the target name, e.g. `299` for `Venus (299)`.
    pub target_id: Option<i64>,
    pub center_name: String,
    pub center_id: Option<i64>,
    pub target_radii: Radii,
    pub center_radii: Radii,
    pub is_topocentric: bool,
    /// Present only when `is_topocentric`.
    pub observer_site: Option<ObserverSite>,
    pub format_kind: FormatKind,
    pub reference_frame: Option<String>,
}

/// One recognized header line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HeaderField {
    TargetName(String),
    CenterName(String),
    TargetRadii(Radii),
    CenterRadii(Radii),
    EquatorialRadius(Kilometer),
    PolarAxis(Kilometer),
    SiteName(String),
    /// `Center-site name:` naming the body center itself rather than a surface site.
    BodyCenterSite,
    Geodetic(GeodeticCoord),
    Cylindrical(CylindricalCoord),
    ReferenceFrame(String),
    CartesianOutput,
}

const CARTESIAN_MARKER: &str = "GEOMETRIC cartesian states";

fn prefix_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid header regex")
}

static TARGET_NAME: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Target body name\s*:\s*(?P<value>.*?)\s*(?:\{[^}]*\})?\s*$"));
static CENTER_NAME: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Center body name\s*:\s*(?P<value>.*?)\s*(?:\{[^}]*\})?\s*$"));
static TARGET_RADII: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Target radii\s*:\s*(?P<value>[^{]*)"));
static CENTER_RADII: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Center radii\s*:\s*(?P<value>[^{]*)"));
static EQU_RADIUS: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Equ\. radius, km\s*=\s*(?P<value>[-+]?\d+(?:\.\d*)?)"));
static POLAR_AXIS: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Polar axis, km\s*=\s*(?P<value>[-+]?\d+(?:\.\d*)?)"));
static SITE_NAME: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Center-site name\s*:\s*(?P<value>.*?)\s*$"));
static GEODETIC: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Center geodetic\s*:\s*(?P<value>[^{]*)"));
static CYLINDRIC: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Center cylindric\s*:\s*(?P<value>[^{]*)"));
static REFERENCE_FRAME: LazyLock<Regex> =
    LazyLock::new(|| prefix_regex(r"^Reference frame\s*:\s*(?P<value>.*?)\s*$"));
static BODY_ID: LazyLock<Regex> = LazyLock::new(|| prefix_regex(r"\((?P<id>-?\d+)\)\s*$"));

/// Return the `value` capture of `re` on `line`, if it matched.
fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.name("value"))
        .map(|m| m.as_str())
}

/// Non-empty trimmed name.
fn name_field(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Read an ellipsoid from the numeric fields of a radii line.
///
/// Three or more figures give `(a, b, c)`, two give `(a, a, c)` and a single one a sphere.
fn radii_field(value: &str) -> Option<Radii> {
    let figures: Vec<f64> = numeric_tokens(value).iter().map(|t| t.value).collect();
    match figures.as_slice() {
        [a, b, c, ..] => Some(Radii::new(*a, *b, *c)),
        [a, c] => Some(Radii::new(*a, *a, *c)),
        [r] => Some(Radii::new(*r, *r, *r)),
        [] => None,
    }
}

/// First three numeric fields of a site coordinate line.
fn triple_field(value: &str) -> Option<(f64, f64, f64)> {
    match numeric_tokens(value).as_slice() {
        [a, b, c, ..] => Some((a.value, b.value, c.value)),
        _ => None,
    }
}

fn is_body_center(site: &str) -> bool {
    let site = site.to_ascii_uppercase();
    site.contains("BODY CENTER") || site == "GEOCENTRIC"
}

/// Numeric id printed in parentheses at the end of a body name.
fn body_id(name: &str) -> Option<i64> {
    BODY_ID
        .captures(name)
        .and_then(|caps| caps.name("id"))
        .and_then(|m| m.as_str().parse().ok())
}

/// Recognize a header line.
///
/// Arguments
/// ---------
/// * `line`: one raw line of the report
///
/// Return
/// ------
/// * the header field carried by the line, or `None` for any other line
pub(crate) fn recognize(line: &str) -> Option<HeaderField> {
    let line = line.trim_start();

    if line.starts_with("Target body name") {
        capture(&TARGET_NAME, line)
            .and_then(name_field)
            .map(HeaderField::TargetName)
    } else if line.starts_with("Center body name") {
        capture(&CENTER_NAME, line)
            .and_then(name_field)
            .map(HeaderField::CenterName)
    } else if line.starts_with("Target radii") {
        capture(&TARGET_RADII, line)
            .and_then(radii_field)
            .map(HeaderField::TargetRadii)
    } else if line.starts_with("Center radii") {
        capture(&CENTER_RADII, line)
            .and_then(radii_field)
            .map(HeaderField::CenterRadii)
    } else if line.starts_with("Equ. radius, km") {
        capture(&EQU_RADIUS, line)
            .and_then(|v| v.parse().ok())
            .map(HeaderField::EquatorialRadius)
    } else if line.starts_with("Polar axis, km") {
        capture(&POLAR_AXIS, line)
            .and_then(|v| v.parse().ok())
            .map(HeaderField::PolarAxis)
    } else if line.starts_with("Center-site name") {
        capture(&SITE_NAME, line).map(|site| {
            if is_body_center(site) {
                HeaderField::BodyCenterSite
            } else {
                HeaderField::SiteName(site.to_string())
            }
        })
    } else if line.starts_with("Center geodetic") {
        capture(&GEODETIC, line)
            .and_then(triple_field)
            .map(|(longitude, latitude, altitude)| {
                HeaderField::Geodetic(GeodeticCoord {
                    longitude,
                    latitude,
                    altitude,
                })
            })
    } else if line.starts_with("Center cylindric") {
        capture(&CYLINDRIC, line)
            .and_then(triple_field)
            .map(|(longitude, radial, axial)| {
                HeaderField::Cylindrical(CylindricalCoord {
                    longitude,
                    radial,
                    axial,
                })
            })
    } else if line.starts_with("Reference frame") {
        capture(&REFERENCE_FRAME, line)
            .and_then(name_field)
            .map(HeaderField::ReferenceFrame)
    } else if line.contains(CARTESIAN_MARKER) {
        Some(HeaderField::CartesianOutput)
    } else {
        None
    }
}

/// Values collected during the scan, before defaults are applied.
#[derive(Debug, Default)]
struct HeaderScan {
    target_name: Option<String>,
    center_name: Option<String>,
    target_radii: Option<Radii>,
    center_radii: Option<Radii>,
    equatorial_radius: Option<Kilometer>,
    polar_axis: Option<Kilometer>,
    site_name: Option<String>,
    geodetic: Option<GeodeticCoord>,
    cylindrical: Option<CylindricalCoord>,
    reference_frame: Option<String>,
    cartesian: bool,
}

impl HeaderScan {
    fn record(mut self, field: HeaderField) -> Self {
        match field {
            HeaderField::TargetName(v) => self.target_name = Some(v),
            HeaderField::CenterName(v) => self.center_name = Some(v),
            HeaderField::TargetRadii(v) => self.target_radii = Some(v),
            HeaderField::CenterRadii(v) => self.center_radii = Some(v),
            HeaderField::EquatorialRadius(v) => self.equatorial_radius = Some(v),
            HeaderField::PolarAxis(v) => self.polar_axis = Some(v),
            HeaderField::SiteName(v) => self.site_name = Some(v),
            HeaderField::BodyCenterSite => {}
            HeaderField::Geodetic(v) => self.geodetic = Some(v),
            HeaderField::Cylindrical(v) => self.cylindrical = Some(v),
            HeaderField::ReferenceFrame(v) => self.reference_frame = Some(v),
            HeaderField::CartesianOutput => self.cartesian = true,
        }
        self
    }

    /// Target ellipsoid: explicit radii, then the geophysical figures, then the default sphere.
    fn resolve_target_radii(&self, default_radius: Kilometer) -> Radii {
        if let Some(radii) = self.target_radii {
            return radii;
        }
        match (self.equatorial_radius, self.polar_axis) {
            (Some(equ), Some(polar)) => Radii::new(equ, equ, polar),
            (Some(r), None) | (None, Some(r)) => Radii::new(r, r, r),
            (None, None) => Radii::repeat(default_radius),
        }
    }

    fn finish(self, default_radius: Kilometer) -> Result<HeaderMetadata, EphemError> {
        let target_radii = self.resolve_target_radii(default_radius);
        let center_radii = self
            .center_radii
            .unwrap_or_else(|| Radii::repeat(default_radius));

        let target_name = self
            .target_name
            .ok_or(EphemError::MissingHeaderField("Target body name"))?;
        let center_name = self
            .center_name
            .ok_or(EphemError::MissingHeaderField("Center body name"))?;

        let is_topocentric = self.site_name.is_some();
        let observer_site = self.site_name.map(|name| ObserverSite {
            name: Some(name),
            geodetic: self.geodetic,
            cylindrical: self.cylindrical,
        });

        Ok(HeaderMetadata {
            target_id: body_id(&target_name),
            center_id: body_id(&center_name),
            target_name,
            center_name,
            target_radii,
            center_radii,
            is_topocentric,
            observer_site,
            format_kind: if self.cartesian {
                FormatKind::CartesianStateVector
            } else {
                FormatKind::AngularAstrometric
            },
            reference_frame: self.reference_frame,
        })
    }
}

/// Scan all lines of a report once and extract its metadata.
///
/// Arguments
/// ---------
/// * `lines`: every line of the report
/// * `default_radius`: radius (km) used on every axis when a body has no usable figure
///
/// Return
/// ------
/// * the header metadata, or [`EphemError::MissingHeaderField`] when the target or center
///   name never appears
pub fn scan_header(lines: &[&str], default_radius: Kilometer) -> Result<HeaderMetadata, EphemError> {
    lines
        .iter()
        .filter_map(|line| recognize(line))
        .fold(HeaderScan::default(), HeaderScan::record)
        .finish(default_radius)
}
