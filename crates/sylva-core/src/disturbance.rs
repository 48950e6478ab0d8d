//! Disturbance contracts: events that reduce or remove cohorts.
//!
//! A disturbance (fire, harvest, wind) is described by the extension
//! that raises it. Two capability variants exist: cohort-level policies
//! decide a biomass reduction per cohort, species-level policies mark
//! whole cohorts of a species for death. Both expose the disturbed site
//! and a type tag through the common [`Disturbance`] supertrait.

use std::fmt;

use crate::cohort::CohortView;
use crate::id::{SiteId, SpeciesId};

/// Tag identifying the kind of a disturbance, e.g. `"fire"` or
/// `"harvest"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DisturbanceKind(String);

impl DisturbanceKind {
    /// Construct a kind from its tag string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisturbanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common surface of every disturbance descriptor.
pub trait Disturbance {
    /// The site the disturbance is acting on.
    fn site(&self) -> SiteId;

    /// The disturbance-type tag.
    fn kind(&self) -> &DisturbanceKind;
}

/// A disturbance that damages individual cohorts.
///
/// The sequence presents each of its cohorts in turn; the policy
/// returns the biomass to remove from that cohort. Returning the
/// cohort's full biomass kills it.
pub trait CohortDisturbance: Disturbance {
    /// Biomass to remove from `cohort`, in `[0, cohort.biomass]`.
    fn reduce(&mut self, cohort: CohortView<'_>) -> f64;
}

/// A disturbance that kills whole cohorts of a species outright.
///
/// The sequence hands over its age ladder (oldest to youngest) and a
/// kill mask of the same length, initially all `false`; the policy sets
/// `killed[i]` for each cohort that dies.
pub trait SpeciesDisturbance: Disturbance {
    /// Decide which cohorts of `species` die.
    fn mark_for_death(&mut self, species: SpeciesId, ages: &[u32], killed: &mut [bool]);
}

/// Observer notified once per disturbance-removal call, before any
/// cohort is actually removed.
///
/// Observers are invoked synchronously in registration order.
pub trait DisturbanceObserver {
    /// A disturbance of `kind` is about to remove cohorts at `site`.
    fn on_disturbance(&mut self, site: SiteId, kind: &DisturbanceKind);
}
