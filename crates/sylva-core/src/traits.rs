//! Collaborator traits: the seams between the succession core and the
//! cohort model supplied by the surrounding extension.
//!
//! The core never represents cohorts itself. It owns one
//! [`CohortSequence`] per species present at a site, and drives the
//! sequences through a globally ordered traversal; everything biological
//! (how a cohort grows, when it dies, how young cohorts merge) lives
//! behind these traits.

use crate::cohort::{CohortSeed, CohortView};
use crate::disturbance::{CohortDisturbance, SpeciesDisturbance};
use crate::id::{SiteId, SpeciesId};

/// The ordered cohorts of one species at one site.
///
/// # Contract
///
/// - Cohorts are kept oldest to youngest; ages within a sequence are
///   strictly descending and are the ordering key.
/// - An empty sequence must report `len() == 0` and
///   `oldest_age() == None`; the collection removes such entries.
/// - At most one walk is active at a time. [`walk_start`] resets the
///   cursor to the oldest cohort; [`grow_current`] grows the cohort
///   under the cursor (and may remove it, or recruit new cohorts
///   younger than the cursor); [`walk_advance`] moves to the next
///   younger cohort. The walk is driven externally so several species'
///   walks can be interleaved into one site-wide age order.
/// - `grow_current` must be deterministic: identical sequence state and
///   context produce identical results.
///
/// [`walk_start`]: CohortSequence::walk_start
/// [`grow_current`]: CohortSequence::grow_current
/// [`walk_advance`]: CohortSequence::walk_advance
pub trait CohortSequence {
    /// The species whose cohorts this sequence holds.
    fn species(&self) -> SpeciesId;

    /// Number of cohorts currently tracked.
    fn len(&self) -> usize;

    /// Whether the sequence holds no cohorts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Age of the oldest cohort, or `None` when empty.
    fn oldest_age(&self) -> Option<u32>;

    /// The age ladder, oldest to youngest.
    fn ages(&self) -> Vec<u32>;

    /// Whether at least one cohort has reached reproductive maturity.
    ///
    /// May be stale after growth removed cohorts; the collection calls
    /// [`refresh_mature_present`](CohortSequence::refresh_mature_present)
    /// at the points where staleness matters.
    fn is_mature_present(&self) -> bool;

    /// Recompute the maturity flag from the current cohorts.
    fn refresh_mature_present(&mut self);

    /// Combine all cohorts younger than `succession_timestep` into one
    /// synthetic cohort of age `succession_timestep` whose biomass is
    /// the sum of the combined cohorts.
    ///
    /// Bounds the number of live cohorts tracked between succession
    /// steps. A no-op when no cohort is younger than the timestep.
    fn combine_young(&mut self, succession_timestep: u32);

    /// Insert a new cohort, preserving age order.
    fn add_cohort(&mut self, seed: CohortSeed);

    /// Reset the walk cursor to the oldest cohort.
    ///
    /// Returns that cohort's age, or `None` if the sequence is empty.
    fn walk_start(&mut self) -> Option<u32>;

    /// Grow the cohort under the walk cursor by one step.
    ///
    /// The sequence applies its own growth and mortality model, reading
    /// the site handle, the timestep flags, and the growth-reduction
    /// strategy from `ctx`. Growing may remove the current cohort or
    /// recruit new cohorts; the cursor stays positioned so that a
    /// following [`walk_advance`](CohortSequence::walk_advance) visits
    /// each remaining cohort exactly once.
    fn grow_current(&mut self, ctx: &GrowthContext<'_>);

    /// Advance the walk cursor to the next younger cohort.
    ///
    /// Returns the new current cohort's age, or `None` when the walk is
    /// exhausted.
    fn walk_advance(&mut self) -> Option<u32>;

    /// Apply a cohort-level disturbance: present each cohort to the
    /// policy, remove the biomass it decides on, delete cohorts whose
    /// biomass reaches zero. Returns total biomass removed.
    fn mark_cohorts(&mut self, disturbance: &mut dyn CohortDisturbance) -> f64;

    /// Apply a species-level disturbance: hand the policy the age
    /// ladder, then delete every cohort it marked. Returns total
    /// biomass removed.
    fn mark_species_cohorts(&mut self, disturbance: &mut dyn SpeciesDisturbance) -> f64;
}

/// Creates the cohort sequence for a species on its first cohort at a
/// site.
///
/// Injected through the site configuration so the collection can create
/// entries lazily without knowing the concrete sequence type.
pub trait SequenceFactory {
    /// Build a sequence holding exactly the cohort described by `seed`.
    fn create(&self, species: SpeciesId, seed: CohortSeed) -> Box<dyn CohortSequence>;
}

/// Strategy for non-growth biomass losses applied during growth, such
/// as defoliation by insects.
///
/// # Contract
///
/// - `compute` must be pure and deterministic: no interior mutability
///   observable across calls, identical inputs give identical results.
/// - The returned fraction must lie in `[0, 1]`; the growth context
///   clamps out-of-range values in release builds and asserts in debug
///   builds.
pub trait GrowthReduction {
    /// Fraction of `cohort`'s biomass lost at `site` this step.
    fn compute(&self, cohort: CohortView<'_>, site: SiteId) -> f64;
}

/// Read-only context handed to [`CohortSequence::grow_current`].
///
/// Carries the site handle, the timestep flags, and the active
/// growth-reduction strategy. Built by the site collection once per
/// growth call; sequences must not retain it.
pub struct GrowthContext<'a> {
    site: SiteId,
    annual_timestep: bool,
    succession_timestep: u32,
    reduction: &'a dyn GrowthReduction,
}

impl<'a> GrowthContext<'a> {
    /// Construct a growth context.
    ///
    /// Typically called by the site collection, not by sequences. For
    /// testing, construct one directly around a canned strategy.
    pub fn new(
        site: SiteId,
        annual_timestep: bool,
        succession_timestep: u32,
        reduction: &'a dyn GrowthReduction,
    ) -> Self {
        Self {
            site,
            annual_timestep,
            succession_timestep,
            reduction,
        }
    }

    /// The site the cohorts are growing at.
    pub fn site(&self) -> SiteId {
        self.site
    }

    /// Whether this is an annual step, as opposed to a multi-year
    /// succession step.
    pub fn annual_timestep(&self) -> bool {
        self.annual_timestep
    }

    /// The configured succession timestep length in years.
    pub fn succession_timestep(&self) -> u32 {
        self.succession_timestep
    }

    /// The active growth-reduction strategy.
    pub fn reduction(&self) -> &dyn GrowthReduction {
        self.reduction
    }

    /// Evaluate the growth-reduction strategy for `cohort`, clamped to
    /// `[0, 1]`.
    pub fn growth_reduction(&self, cohort: CohortView<'_>) -> f64 {
        let fraction = self.reduction.compute(cohort, self.site);
        debug_assert!(
            (0.0..=1.0).contains(&fraction),
            "growth reduction {fraction} outside [0, 1]"
        );
        fraction.clamp(0.0, 1.0)
    }
}
