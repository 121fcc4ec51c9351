//! # horizons-track
//!
//! Ingestion of JPL Horizons text ephemerides into a time-indexed, interpolatable track.
//!
//! ## Pipeline
//!
//! 1. **Header scan** ([`horizon::header`]): target/center names, body radii, observing site,
//!    row layout.
//! 2. **Row parsing**: angular RA/DEC/range rows ([`horizon::angular_reader`]) or three-line
//!    Cartesian state vectors ([`horizon::vector_reader`]).
//! 3. **Frame correction** ([`observers::topocentric`]): topocentric angular rows are moved to
//!    the body center by adding the site vector rotated by the Greenwich mean sidereal time.
//! 4. **Track** ([`track::EphemerisTrack`]): time-ordered samples answering position,
//!    direction and distance queries by linear interpolation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use hifitime::Epoch;
//! use horizons_track::{EphemerisDocument, ImportParams, AU};
//!
//! let document = EphemerisDocument::read_file(
//!     Utf8Path::new("tests/data/venus_geocentric.txt"),
//!     &ImportParams::default(),
//! )?;
//! println!("{document}");
//!
//! let track = document.track();
//! let t = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 30, 0);
//! let position_km = track.evaluate_position(&t, AU);
//! # Ok::<(), horizons_track::EphemError>(())
//! ```

pub mod constants;
pub mod conversion;
pub mod ephem_errors;
pub mod horizon;
pub mod import_params;
pub mod observers;
pub mod ref_system;
pub mod time;
pub mod tokenizer;
pub mod track;

pub use constants::AU;
pub use ephem_errors::{EphemError, ParseRowError};
pub use horizon::document::{EphemerisDocument, Entry};
pub use horizon::header::{FormatKind, HeaderMetadata};
pub use import_params::{ImportParams, UndatedRowPolicy};
pub use track::EphemerisTrack;
