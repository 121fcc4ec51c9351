//! # Import configuration
//!
//! [`ImportParams`] gathers the tunable parts of a Horizons import:
//!
//! | Field                    | Default          | Meaning                                                    |
//! |--------------------------|------------------|------------------------------------------------------------|
//! | `km_per_au`              | `149597870.7`    | Kilometers per astronomical unit for every AU ↔ km step.   |
//! | `default_radius_km`      | `1000.0`         | Radius used on every axis when no body figure is found.    |
//! | `undated_rows`           | `Skip`           | What to do with angular rows without a usable timestamp.   |
//! | `topocentric_correction` | `true`           | Move topocentric angular rows to the body center.          |
//!
//! Parameters are built either with [`ImportParams::default`] or through the validating
//! [`ImportParamsBuilder`]:
//!
//! ```rust
//! use horizons_track::import_params::{ImportParams, UndatedRowPolicy};
//!
//! let params = ImportParams::builder()
//!     .undated_rows(UndatedRowPolicy::KeepWithSentinel)
//!     .topocentric_correction(false)
//!     .build()
//!     .unwrap();
//! assert!(!params.topocentric_correction);
//! ```

use crate::constants::{Kilometer, AU, DEFAULT_BODY_RADIUS};
use crate::ephem_errors::EphemError;

/// Handling of angular rows whose timestamp is missing or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndatedRowPolicy {
    /// Drop the row: it cannot be placed on the sampling grid.
    #[default]
    Skip,
    /// Keep the row, stamped with [`crate::time::sentinel_epoch`].
    KeepWithSentinel,
}

/// Parameters of a Horizons import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportParams {
    pub km_per_au: Kilometer,
    pub default_radius_km: Kilometer,
    pub undated_rows: UndatedRowPolicy,
    pub topocentric_correction: bool,
}

impl ImportParams {
    /// Construct a new [`ImportParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ImportParamsBuilder`] initialized with default values.
    pub fn builder() -> ImportParamsBuilder {
        ImportParamsBuilder::new()
    }
}

impl Default for ImportParams {
    fn default() -> Self {
        ImportParams {
            km_per_au: AU,
            default_radius_km: DEFAULT_BODY_RADIUS,
            undated_rows: UndatedRowPolicy::Skip,
            topocentric_correction: true,
        }
    }
}

/// Builder for [`ImportParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ImportParamsBuilder {
    params: ImportParams,
}

impl ImportParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ImportParams::default(),
        }
    }

    pub fn km_per_au(mut self, v: Kilometer) -> Self {
        self.params.km_per_au = v;
        self
    }
    pub fn default_radius_km(mut self, v: Kilometer) -> Self {
        self.params.default_radius_km = v;
        self
    }
    pub fn undated_rows(mut self, v: UndatedRowPolicy) -> Self {
        self.params.undated_rows = v;
        self
    }
    pub fn topocentric_correction(mut self, v: bool) -> Self {
        self.params.topocentric_correction = v;
        self
    }

    /// Return true iff x is finite and strictly positive.
    #[inline]
    fn finite_gt0(x: f64) -> bool {
        x.is_finite() && x > 0.0
    }

    /// Finalize the builder and produce an [`ImportParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `km_per_au` must be finite and `> 0`.
    /// * `default_radius_km` must be finite and `> 0`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(ImportParams)` if all values are valid.
    /// * `Err(EphemError::InvalidImportParameter)` otherwise.
    pub fn build(self) -> Result<ImportParams, EphemError> {
        let p = &self.params;

        if !Self::finite_gt0(p.km_per_au) {
            return Err(EphemError::InvalidImportParameter(
                "km_per_au must be finite and > 0".into(),
            ));
        }
        if !Self::finite_gt0(p.default_radius_km) {
            return Err(EphemError::InvalidImportParameter(
                "default_radius_km must be finite and > 0".into(),
            ));
        }

        Ok(self.params)
    }
}
