//! Sylva: a deterministic forest cohort succession library.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Sylva sub-crates. For most users, adding `sylva` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sylva::prelude::*;
//!
//! // A minimal sequence holding a single cohort per species.
//! struct OneCohort {
//!     species: SpeciesId,
//!     age: u32,
//!     biomass: f64,
//! }
//!
//! impl CohortSequence for OneCohort {
//!     fn species(&self) -> SpeciesId { self.species }
//!     fn len(&self) -> usize { 1 }
//!     fn oldest_age(&self) -> Option<u32> { Some(self.age) }
//!     fn ages(&self) -> Vec<u32> { vec![self.age] }
//!     fn is_mature_present(&self) -> bool { true }
//!     fn refresh_mature_present(&mut self) {}
//!     fn combine_young(&mut self, _succession_timestep: u32) {}
//!     fn add_cohort(&mut self, _seed: CohortSeed) {}
//!     fn walk_start(&mut self) -> Option<u32> { Some(self.age) }
//!     fn grow_current(&mut self, _ctx: &GrowthContext<'_>) {
//!         self.age += 1;
//!         self.biomass += 10.0;
//!     }
//!     fn walk_advance(&mut self) -> Option<u32> { None }
//!     fn mark_cohorts(&mut self, disturbance: &mut dyn CohortDisturbance) -> f64 {
//!         let attrs = AttrMap::new();
//!         let removed = disturbance.reduce(CohortView {
//!             species: self.species,
//!             age: self.age,
//!             biomass: self.biomass,
//!             attrs: &attrs,
//!         });
//!         self.biomass -= removed;
//!         removed
//!     }
//!     fn mark_species_cohorts(&mut self, _d: &mut dyn SpeciesDisturbance) -> f64 { 0.0 }
//! }
//!
//! struct OneCohortFactory;
//! impl SequenceFactory for OneCohortFactory {
//!     fn create(&self, species: SpeciesId, seed: CohortSeed) -> Box<dyn CohortSequence> {
//!         Box::new(OneCohort { species, age: seed.age, biomass: seed.biomass })
//!     }
//! }
//!
//! // Grow a two-species site for one year.
//! let config = SiteConfig::new(SiteId(1), Box::new(OneCohortFactory));
//! let mut site = SiteCohorts::new(config).unwrap();
//! site.add_new_cohort(SpeciesId(1), 40, 120.0, None, &AttrMap::new());
//! site.add_new_cohort(SpeciesId(2), 25, 60.0, None, &AttrMap::new());
//!
//! let stats = site.grow(false, true).unwrap();
//! assert_eq!(stats.cohorts_grown, 2);
//! assert_eq!(site.to_string(), "1:41. 2:26. ");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sylva-core` | IDs, attribute bags, disturbance and sequence traits, errors |
//! | [`site`] | `sylva-site` | The site cohort collection, dead-mass pool, reference strategies |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`sylva-core`).
pub use sylva_core as types;

/// Site orchestration: collection, traversal, pool (`sylva-site`).
pub use sylva_site as site;

/// The most commonly used items, re-exported flat.
pub mod prelude {
    pub use sylva_core::{
        deep_clone_attrs, AttrMap, AttrValue, CohortDisturbance, CohortSeed, CohortSequence,
        CohortView, Disturbance, DisturbanceKind, DisturbanceObserver, GrowError, GrowthContext,
        GrowthReduction, PoolError, SequenceFactory, SiteId, SpeciesDisturbance, SpeciesId,
    };
    pub use sylva_site::{
        ConfigError, DeadMassPool, FixedReduction, GrowthStats, NoReduction, SiteCohorts,
        SiteConfig,
    };
}
