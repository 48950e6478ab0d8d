//! The site cohort collection and its merged growth traversal.
//!
//! [`SiteCohorts`] owns one cohort sequence per species present at a
//! site and drives them all through one simulated year in a single
//! globally deterministic oldest-to-youngest order. Growth of one
//! cohort may read aggregate site state mutated by growth of another,
//! so the cross-species order is part of the model's semantics, not an
//! implementation detail.

use std::fmt;

use sylva_core::{
    deep_clone_attrs, AttrMap, CohortDisturbance, CohortSeed, CohortSequence, DisturbanceKind,
    DisturbanceObserver, GrowError, GrowthContext, GrowthReduction, SequenceFactory, SiteId,
    SpeciesDisturbance, SpeciesId,
};

use crate::config::{ConfigError, SiteConfig};
use crate::walk::{insert_descending, WalkEntry, WalkList};

/// Bookkeeping counts from one growth call.
///
/// Returned instead of logged so the driver can aggregate across sites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Cohorts grown this call (each exactly once).
    pub cohorts_grown: usize,
    /// Species entries removed because their sequence emptied.
    pub sequences_removed: usize,
}

/// All cohorts at one landscape site, grouped by species.
///
/// Entries are kept in insertion order (first cohort of a species
/// creates its entry); that order is semantically relevant only as the
/// tie-break when two species' cohorts share an age during the merged
/// growth traversal.
pub struct SiteCohorts {
    site: SiteId,
    succession_timestep: u32,
    factory: Box<dyn SequenceFactory>,
    reduction: Box<dyn GrowthReduction>,
    sequences: Vec<Box<dyn CohortSequence>>,
    observers: Vec<Box<dyn DisturbanceObserver>>,
}

impl SiteCohorts {
    /// Build an empty collection from a validated configuration.
    pub fn new(config: SiteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            site: config.site,
            succession_timestep: config.succession_timestep,
            factory: config.factory,
            reduction: config.reduction,
            sequences: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// The site this collection belongs to.
    pub fn site(&self) -> SiteId {
        self.site
    }

    /// The configured succession timestep length in years.
    pub fn succession_timestep(&self) -> u32 {
        self.succession_timestep
    }

    /// Number of species with at least one cohort present.
    pub fn species_count(&self) -> usize {
        self.sequences.len()
    }

    /// Whether no cohorts are present at all.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The cohort sequence for `species`, if present.
    pub fn get(&self, species: SpeciesId) -> Option<&dyn CohortSequence> {
        self.sequences
            .iter()
            .find(|s| s.species() == species)
            .map(|s| s.as_ref())
    }

    /// Whether `species` has at least one mature cohort at this site.
    ///
    /// `false` when the species is absent.
    pub fn is_mature_present(&self, species: SpeciesId) -> bool {
        self.get(species).is_some_and(|s| s.is_mature_present())
    }

    /// Iterate over the species sequences in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CohortSequence> {
        self.sequences.iter().map(|s| s.as_ref())
    }

    /// Replace the growth-reduction strategy.
    ///
    /// Reconfiguration only: must not be called while a growth or
    /// disturbance call is in flight (the collection is single-threaded
    /// per site, so in practice this means "between years").
    pub fn set_growth_reduction(&mut self, reduction: Box<dyn GrowthReduction>) {
        self.reduction = reduction;
    }

    /// Register a disturbance observer.
    ///
    /// Observers fire once per disturbance-removal call, before cohorts
    /// are removed, in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn DisturbanceObserver>) {
        self.observers.push(observer);
    }

    /// Add a new cohort for `species`.
    ///
    /// The attribute bag is deep-copied before storage, so the caller
    /// may freely mutate `attrs` afterwards. An existing species entry
    /// absorbs the cohort in age order; a first cohort creates the
    /// entry through the configured factory, at the end of the
    /// insertion order.
    pub fn add_new_cohort(
        &mut self,
        species: SpeciesId,
        age: u32,
        initial_biomass: f64,
        initial_anpp: Option<f64>,
        attrs: &AttrMap,
    ) {
        let seed = CohortSeed {
            age,
            biomass: initial_biomass,
            anpp: initial_anpp,
            attrs: deep_clone_attrs(attrs),
        };
        match self.sequences.iter().position(|s| s.species() == species) {
            Some(i) => self.sequences[i].add_cohort(seed),
            None => {
                let sequence = self.factory.create(species, seed);
                self.sequences.push(sequence);
            }
        }
    }

    /// Grow every cohort at the site for one year.
    ///
    /// At a succession boundary with a multi-year timestep, every
    /// sequence first combines its young cohorts (ages below the
    /// timestep) into one synthetic cohort, bounding the number of
    /// cohorts tracked between succession steps. Then all cohorts are
    /// grown exactly once, in globally descending age order with stable
    /// tie-breaking.
    pub fn grow(
        &mut self,
        is_succession_timestep: bool,
        annual_timestep: bool,
    ) -> Result<GrowthStats, GrowError> {
        if is_succession_timestep && self.succession_timestep > 1 {
            for sequence in &mut self.sequences {
                sequence.combine_young(self.succession_timestep);
            }
        }
        self.grow_for_one_year(annual_timestep)
    }

    /// The merged traversal: a k-way merge over the per-species
    /// sequences, maintained incrementally as cursors advance.
    fn grow_for_one_year(&mut self, annual_timestep: bool) -> Result<GrowthStats, GrowError> {
        let ctx = GrowthContext::new(
            self.site,
            annual_timestep,
            self.succession_timestep,
            &*self.reduction,
        );

        // One walk cursor per non-empty sequence, ordered oldest first;
        // equal ages keep the order entries were inserted in, which is
        // the collection's insertion order here.
        let mut walk = WalkList::new();
        for (i, sequence) in self.sequences.iter_mut().enumerate() {
            match sequence.walk_start() {
                Some(age) => insert_descending(&mut walk, WalkEntry { seq: i, age }),
                None if sequence.len() > 0 => {
                    return Err(GrowError::SequenceInconsistent {
                        species: sequence.species(),
                    });
                }
                None => {}
            }
        }

        let mut stats = GrowthStats::default();
        let mut emptied: Vec<usize> = Vec::new();

        while !walk.is_empty() {
            // Grow the current cohort of the front cursor: the single
            // oldest cohort not yet grown this year.
            let index = walk[0].seq;
            let sequence = &mut self.sequences[index];
            sequence.grow_current(&ctx);
            stats.cohorts_grown += 1;

            match sequence.walk_advance() {
                Some(age) => {
                    walk[0].age = age;
                    if walk.len() > 1 && age < walk[1].age {
                        // No longer the oldest: re-insert at the proper
                        // place, after any entries with the same age.
                        let moved = walk.remove(0);
                        insert_descending(&mut walk, moved);
                    }
                }
                None => {
                    walk.remove(0);
                    if sequence.len() > 0 {
                        // Growth recruited new cohorts after the cursor
                        // passed; the maturity flag may be stale.
                        if sequence.oldest_age().is_none() {
                            return Err(GrowError::SequenceInconsistent {
                                species: sequence.species(),
                            });
                        }
                        sequence.refresh_mature_present();
                    } else {
                        emptied.push(index);
                        stats.sequences_removed += 1;
                    }
                }
            }
        }

        // Deferred removal keeps the surviving entries' insertion order
        // (and the indices inside `walk` valid while it drains).
        emptied.sort_unstable();
        for index in emptied.into_iter().rev() {
            self.sequences.remove(index);
        }
        Ok(stats)
    }

    /// Apply a cohort-level disturbance across all species, returning
    /// the total biomass removed.
    ///
    /// Species entries are visited back to front so dropping an
    /// emptied entry cannot skip or double-visit a neighbor.
    pub fn reduce_or_kill_cohorts(&mut self, disturbance: &mut dyn CohortDisturbance) -> f64 {
        let mut total = 0.0;
        for i in (0..self.sequences.len()).rev() {
            total += self.sequences[i].mark_cohorts(disturbance);
            if self.sequences[i].is_empty() {
                self.sequences.remove(i);
            }
        }
        total
    }

    /// Notify observers, then apply a cohort-level disturbance.
    ///
    /// Observers see the site and disturbance kind before any cohort is
    /// removed. Returns the total biomass removed.
    pub fn remove_marked_cohorts(&mut self, disturbance: &mut dyn CohortDisturbance) -> f64 {
        self.notify_observers(disturbance.site(), disturbance.kind().clone());
        self.reduce_or_kill_cohorts(disturbance)
    }

    /// Notify observers, then apply a species-level disturbance.
    ///
    /// Same two-step protocol as
    /// [`remove_marked_cohorts`](SiteCohorts::remove_marked_cohorts),
    /// with the marking delegated through the species-level policy.
    pub fn remove_marked_species_cohorts(
        &mut self,
        disturbance: &mut dyn SpeciesDisturbance,
    ) -> f64 {
        self.notify_observers(disturbance.site(), disturbance.kind().clone());
        let mut total = 0.0;
        for i in (0..self.sequences.len()).rev() {
            total += self.sequences[i].mark_species_cohorts(disturbance);
            if self.sequences[i].is_empty() {
                self.sequences.remove(i);
            }
        }
        total
    }

    fn notify_observers(&mut self, site: SiteId, kind: DisturbanceKind) {
        for observer in &mut self.observers {
            observer.on_disturbance(site, &kind);
        }
    }
}

impl fmt::Display for SiteCohorts {
    /// Lists every cohort as `species:age. ` pairs, species in
    /// insertion order, cohorts oldest to youngest.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sequence in &self.sequences {
            let species = sequence.species();
            for age in sequence.ages() {
                write!(f, "{species}:{age}. ")?;
            }
        }
        Ok(())
    }
}
