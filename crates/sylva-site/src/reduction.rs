//! Reference growth-reduction strategies.
//!
//! Real strategies (defoliation models, browse damage) are supplied by
//! extensions; these two cover the default case and testing.

use sylva_core::{CohortView, GrowthReduction, SiteId};

use crate::config::ConfigError;

/// The default strategy: no growth reduction, ever.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReduction;

impl GrowthReduction for NoReduction {
    fn compute(&self, _cohort: CohortView<'_>, _site: SiteId) -> f64 {
        0.0
    }
}

/// Reduces every cohort by the same fraction.
///
/// Mostly useful in tests and calibration runs; the fraction is
/// validated once at construction so `compute` stays infallible.
#[derive(Clone, Copy, Debug)]
pub struct FixedReduction {
    fraction: f64,
}

impl FixedReduction {
    /// A strategy returning `fraction` for every cohort.
    ///
    /// Rejects fractions outside `[0, 1]`.
    pub fn new(fraction: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ConfigError::FractionOutOfRange { fraction });
        }
        Ok(Self { fraction })
    }

    /// The configured fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

impl GrowthReduction for FixedReduction {
    fn compute(&self, _cohort: CohortView<'_>, _site: SiteId) -> f64 {
        self.fraction
    }
}
