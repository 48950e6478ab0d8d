//! Benchmark profiles for the Sylva succession core.
//!
//! Provides deterministic site populations for benchmarking the merged
//! growth traversal:
//!
//! - [`populated_site`]: a site with `species_count` species and
//!   `cohorts_per_species` cohorts each, ages drawn from a seeded RNG.
//! - [`reference_site`]: 6 species x 20 cohorts, a typical temperate
//!   mixed stand.
//! - [`stress_site`]: 30 species x 50 cohorts, for worst-case k-way
//!   merge behavior.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sylva_core::{AttrMap, SiteId, SpeciesId};
use sylva_site::{SiteCohorts, SiteConfig};
use sylva_test_utils::ScriptedFactory;

/// Build a site populated with deterministic pseudo-random cohorts.
///
/// Ages are distinct within each species and drawn from `5..=300`;
/// biomass from `1.0..100.0`. The succession timestep is 10 years so
/// boundary benchmarks exercise the combine-young scan. Identical
/// seeds produce identical sites.
pub fn populated_site(species_count: u32, cohorts_per_species: usize, seed: u64) -> SiteCohorts {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut site = SiteCohorts::new(
        SiteConfig::new(SiteId(0), Box::<ScriptedFactory>::default())
            .with_succession_timestep(10),
    )
    .expect("default config is valid");

    for s in 0..species_count {
        let species = SpeciesId(s);
        let mut ages: Vec<u32> = Vec::with_capacity(cohorts_per_species);
        while ages.len() < cohorts_per_species {
            let age = rng.random_range(5u32..=300);
            if !ages.contains(&age) {
                ages.push(age);
            }
        }
        for age in ages {
            let biomass = rng.random_range(1.0f64..100.0);
            site.add_new_cohort(species, age, biomass, None, &AttrMap::new());
        }
    }
    site
}

/// A typical temperate mixed stand: 6 species, 20 cohorts each.
pub fn reference_site(seed: u64) -> SiteCohorts {
    populated_site(6, 20, seed)
}

/// A worst-case stand for the k-way merge: 30 species, 50 cohorts each.
pub fn stress_site(seed: u64) -> SiteCohorts {
    populated_site(30, 50, seed)
}
