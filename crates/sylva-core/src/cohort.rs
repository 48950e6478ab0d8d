//! Cohort views and insertion seeds.
//!
//! A cohort (one same-age, same-species group of trees) is owned by its
//! species' sequence; the core never holds cohorts directly. These types
//! are the two ways cohort data crosses the collection boundary: a
//! borrowed read-only view handed to strategies and disturbances, and an
//! owned seed handed to a sequence on insertion.

use crate::attrs::AttrMap;
use crate::id::SpeciesId;

/// Borrowed read-only view of one cohort.
///
/// Handed to [`GrowthReduction`](crate::traits::GrowthReduction)
/// strategies and [`CohortDisturbance`](crate::disturbance::CohortDisturbance)
/// policies. The view is valid only for the duration of the call.
#[derive(Clone, Copy, Debug)]
pub struct CohortView<'a> {
    /// The cohort's species.
    pub species: SpeciesId,
    /// Age in years.
    pub age: u32,
    /// Above-ground live biomass.
    pub biomass: f64,
    /// The attribute bag attached at creation.
    pub attrs: &'a AttrMap,
}

/// Owned payload for inserting a new cohort into a sequence.
///
/// Built by the site collection, which deep-copies the caller's
/// attribute bag before constructing the seed; the sequence may store
/// the seed's fields directly.
#[derive(Clone, Debug)]
pub struct CohortSeed {
    /// Initial age in years.
    pub age: u32,
    /// Initial biomass.
    pub biomass: f64,
    /// Initial annual net primary productivity, when the growth model
    /// tracks it.
    pub anpp: Option<f64>,
    /// Deep-copied attribute bag.
    pub attrs: AttrMap,
}

impl CohortSeed {
    /// Seed with the given age and biomass, no ANPP, and an empty bag.
    pub fn new(age: u32, biomass: f64) -> Self {
        Self {
            age,
            biomass,
            anpp: None,
            attrs: AttrMap::new(),
        }
    }
}
