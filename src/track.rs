//! # Interpolating ephemeris track
//!
//! [`EphemerisTrack`] is the consumer-facing view of a parsed report: three parallel sequences
//! (UTC time, unit direction, range in AU) ordered by time, queried at arbitrary instants.
//!
//! ## Query contract
//!
//! For a query time `t`:
//!
//! - empty track → zero vector / `0.0`, never an error;
//! - `t ≤ t_first` → first sample, `t ≥ t_last` → last sample (no extrapolation);
//! - otherwise the bracketing pair `(t0, t1)` is found by binary search and the samples are
//!   blended linearly with `α = clamp((t − t0) / max(t1 − t0, ε), 0, 1)`.
//!
//! Positions are `direction × range_au × scale`, so `scale` picks the output unit
//! (e.g. `km_per_au` for kilometers, or a scene scale).
//!
//! ## Example
//!
//! ```rust
//! use hifitime::Epoch;
//! use horizons_track::horizon::document::EphemerisDocument;
//!
//! let report = "\
//! Target body name: Venus (299)
//! Center body name: Earth (399)
//! $$SOE
//!  2024-Jan-01 00:00     00 00 00.00 +00 00 00.0   -3.944   1.383  1.0 0.0
//!  2024-Jan-01 01:00     00 00 00.00 +00 00 00.0   -3.944   1.383  3.0 0.0
//! $$EOE
//! ";
//! let track = report.parse::<EphemerisDocument>().unwrap().track();
//! let t = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 30, 0);
//! assert!((track.evaluate_distance_au(&t) - 2.0).abs() < 1e-9);
//! ```

use hifitime::{Duration, Epoch};
use itertools::{multiunzip, Itertools};
use nalgebra::Vector3;

use crate::constants::{AstronomicalUnit, TIME_EPS};
use crate::horizon::document::{EphemerisDocument, Entry};

/// Time-ordered samples of a target, queryable by interpolation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EphemerisTrack {
    times: Vec<Epoch>,
    directions: Vec<Vector3<f64>>,
    ranges: Vec<AstronomicalUnit>,
}

/// Where a query time falls on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bracket {
    Empty,
    /// Clamped to a single sample.
    At(usize),
    /// Between samples `i` and `i + 1`, with weight `alpha` on `i + 1`.
    Between(usize, f64),
}

impl EphemerisTrack {
    /// Build the track of a parsed document.
    pub fn from_document(document: &EphemerisDocument) -> Self {
        Self::from_entries(document.entries())
    }

    /// Build a track from entries in any order.
    ///
    /// Entries are sorted by time with a stable sort: samples sharing a timestamp keep their
    /// input order.
    pub fn from_entries(entries: &[Entry]) -> Self {
        let (times, directions, ranges) = multiunzip(
            entries
                .iter()
                .sorted_by(|a, b| a.time_utc.cmp(&b.time_utc))
                .map(|e| (e.time_utc, e.direction, e.range_au)),
        );
        EphemerisTrack {
            times,
            directions,
            ranges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn count(&self) -> usize {
        self.times.len()
    }

    pub fn times(&self) -> &[Epoch] {
        &self.times
    }

    pub fn start_time(&self) -> Option<Epoch> {
        self.times.first().copied()
    }

    pub fn end_time(&self) -> Option<Epoch> {
        self.times.last().copied()
    }

    /// Difference between the first two sample times, zero with fewer than two samples.
    pub fn nominal_step(&self) -> Duration {
        match self.times.as_slice() {
            [t0, t1, ..] => *t1 - *t0,
            _ => Duration::ZERO,
        }
    }

    fn bracket(&self, t: &Epoch) -> Bracket {
        let (Some(first), Some(last)) = (self.times.first(), self.times.last()) else {
            return Bracket::Empty;
        };
        if t <= first {
            return Bracket::At(0);
        }
        if t >= last {
            return Bracket::At(self.times.len() - 1);
        }

        // first index with time > t; 1 ≤ upper ≤ len - 1 here
        let upper = self.times.partition_point(|time| time <= t);
        let lower = upper - 1;
        let span = (self.times[upper] - self.times[lower]).to_seconds();
        let elapsed = (*t - self.times[lower]).to_seconds();
        let alpha = (elapsed / span.max(TIME_EPS)).clamp(0.0, 1.0);
        Bracket::Between(lower, alpha)
    }

    fn position_at(&self, i: usize, scale: f64) -> Vector3<f64> {
        self.directions[i] * (self.ranges[i] * scale)
    }

    /// Interpolated position at `t`.
    ///
    /// Arguments
    /// ---------
    /// * `t`: query time (UTC)
    /// * `scale`: length of one AU in the output unit
    ///
    /// Return
    /// ------
    /// * the blended `direction × range_au × scale`, or the zero vector for an empty track
    pub fn evaluate_position(&self, t: &Epoch, scale: f64) -> Vector3<f64> {
        match self.bracket(t) {
            Bracket::Empty => Vector3::zeros(),
            Bracket::At(i) => self.position_at(i, scale),
            Bracket::Between(i, alpha) => self
                .position_at(i, scale)
                .lerp(&self.position_at(i + 1, scale), alpha),
        }
    }

    /// Interpolated range in AU at `t`, `0.0` for an empty track.
    pub fn evaluate_distance_au(&self, t: &Epoch) -> AstronomicalUnit {
        match self.bracket(t) {
            Bracket::Empty => 0.0,
            Bracket::At(i) => self.ranges[i],
            Bracket::Between(i, alpha) => {
                self.ranges[i] + (self.ranges[i + 1] - self.ranges[i]) * alpha
            }
        }
    }

    /// Interpolated unit direction at `t`.
    ///
    /// The two bracketing directions are blended then normalized; the zero vector is returned
    /// for an empty track or when the blend vanishes.
    pub fn evaluate_direction(&self, t: &Epoch) -> Vector3<f64> {
        match self.bracket(t) {
            Bracket::Empty => Vector3::zeros(),
            Bracket::At(i) => self.directions[i],
            Bracket::Between(i, alpha) => self.directions[i]
                .lerp(&self.directions[i + 1], alpha)
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros),
        }
    }
}

impl From<&EphemerisDocument> for EphemerisTrack {
    fn from(document: &EphemerisDocument) -> Self {
        Self::from_document(document)
    }
}
