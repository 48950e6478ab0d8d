//! Site configuration and validation.
//!
//! [`SiteConfig`] is the constructor input for a
//! [`SiteCohorts`](crate::collection::SiteCohorts) collection. It
//! bundles the site handle, the succession-timestep length, the
//! sequence factory, and the growth-reduction strategy; `validate()`
//! checks structural invariants before the collection is built.

use std::error::Error;
use std::fmt;

use sylva_core::{GrowthReduction, SequenceFactory, SiteId};

use crate::reduction::NoReduction;

/// Errors detected during [`SiteConfig::validate()`] or while
/// constructing a reference strategy.
#[derive(Debug)]
pub enum ConfigError {
    /// The succession timestep is zero; it is a length in years and
    /// must be at least 1.
    ZeroSuccessionTimestep,
    /// A fixed reduction fraction lies outside `[0, 1]`.
    FractionOutOfRange {
        /// The rejected fraction.
        fraction: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSuccessionTimestep => {
                write!(f, "succession timestep must be at least 1 year")
            }
            Self::FractionOutOfRange { fraction } => {
                write!(f, "reduction fraction {fraction} outside [0, 1]")
            }
        }
    }
}

impl Error for ConfigError {}

/// Constructor input for a site cohort collection.
///
/// The factory and strategy are installed here, before any growth
/// happens at the site, and are treated as read-only afterwards; the
/// collection never swaps them mid-traversal.
pub struct SiteConfig {
    /// The site this collection belongs to.
    pub site: SiteId,
    /// Succession timestep length in years. When greater than 1, young
    /// cohorts are combined at succession boundaries to bound the
    /// number of cohorts tracked.
    pub succession_timestep: u32,
    /// Creates a species' cohort sequence on its first cohort.
    pub factory: Box<dyn SequenceFactory>,
    /// Strategy for non-growth biomass losses applied during growth.
    pub reduction: Box<dyn GrowthReduction>,
}

impl SiteConfig {
    /// Config with an annual succession timestep and no growth
    /// reduction.
    pub fn new(site: SiteId, factory: Box<dyn SequenceFactory>) -> Self {
        Self {
            site,
            succession_timestep: 1,
            factory,
            reduction: Box::new(NoReduction),
        }
    }

    /// Replace the succession timestep.
    pub fn with_succession_timestep(mut self, years: u32) -> Self {
        self.succession_timestep = years;
        self
    }

    /// Replace the growth-reduction strategy.
    pub fn with_reduction(mut self, reduction: Box<dyn GrowthReduction>) -> Self {
        self.reduction = reduction;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.succession_timestep == 0 {
            return Err(ConfigError::ZeroSuccessionTimestep);
        }
        Ok(())
    }
}
