//! Integration tests: succession timesteps, recruits, and the
//! traversal's consistency guard.

use sylva_core::{AttrMap, CohortSeed, GrowError, SiteId, SpeciesId};
use sylva_site::{SiteCohorts, SiteConfig};
use sylva_test_utils::{new_grow_log, InconsistentFactory, ScriptedFactory};

const SITE: SiteId = SiteId(7);
const A: SpeciesId = SpeciesId(1);

fn site_with(factory: ScriptedFactory, succession_timestep: u32) -> SiteCohorts {
    SiteCohorts::new(
        SiteConfig::new(SITE, Box::new(factory)).with_succession_timestep(succession_timestep),
    )
    .unwrap()
}

#[test]
fn young_cohorts_are_combined_at_a_succession_boundary() {
    let log = new_grow_log();
    let mut collection = site_with(
        ScriptedFactory {
            grow_log: Some(log.clone()),
            ..Default::default()
        },
        10,
    );
    collection.add_new_cohort(A, 30, 5.0, None, &AttrMap::new());
    collection.add_new_cohort(A, 7, 2.0, None, &AttrMap::new());
    collection.add_new_cohort(A, 3, 1.0, None, &AttrMap::new());

    let stats = collection.grow(true, false).unwrap();

    // The 7- and 3-year cohorts merged into one 10-year cohort before
    // growth, so only two cohorts grew.
    assert_eq!(*log.borrow(), vec![(A, 30), (A, 10)]);
    assert_eq!(stats.cohorts_grown, 2);
    assert_eq!(collection.get(A).unwrap().ages(), vec![31, 11]);
}

#[test]
fn no_combining_outside_a_succession_boundary() {
    let log = new_grow_log();
    let mut collection = site_with(
        ScriptedFactory {
            grow_log: Some(log.clone()),
            ..Default::default()
        },
        10,
    );
    collection.add_new_cohort(A, 30, 5.0, None, &AttrMap::new());
    collection.add_new_cohort(A, 7, 2.0, None, &AttrMap::new());
    collection.add_new_cohort(A, 3, 1.0, None, &AttrMap::new());

    collection.grow(false, true).unwrap();

    assert_eq!(*log.borrow(), vec![(A, 30), (A, 7), (A, 3)]);
}

#[test]
fn annual_succession_timestep_never_combines() {
    let log = new_grow_log();
    let mut collection = site_with(
        ScriptedFactory {
            grow_log: Some(log.clone()),
            ..Default::default()
        },
        1,
    );
    collection.add_new_cohort(A, 30, 5.0, None, &AttrMap::new());
    collection.add_new_cohort(A, 3, 1.0, None, &AttrMap::new());

    collection.grow(true, true).unwrap();

    assert_eq!(*log.borrow(), vec![(A, 30), (A, 3)]);
}

#[test]
fn recruits_during_growth_refresh_maturity_and_survive() {
    // The only cohort dies when grown, but growing it recruits a
    // 1-year-old: the species entry must survive the year with its
    // maturity flag recomputed from the recruit alone.
    let mut collection = site_with(
        ScriptedFactory {
            mature_age: 3,
            death_when_grown: vec![(A, 5)],
            recruits_when_grown: vec![(A, 5, CohortSeed::new(1, 1.5))],
            ..Default::default()
        },
        1,
    );
    collection.add_new_cohort(A, 5, 10.0, None, &AttrMap::new());
    assert!(collection.is_mature_present(A));

    let stats = collection.grow(false, true).unwrap();

    assert_eq!(stats.cohorts_grown, 1);
    assert_eq!(stats.sequences_removed, 0);
    assert_eq!(collection.get(A).unwrap().ages(), vec![1]);
    assert!(!collection.is_mature_present(A));
}

#[test]
fn sequence_claiming_cohorts_but_exposing_none_is_an_error() {
    let mut collection = SiteCohorts::new(SiteConfig::new(
        SITE,
        Box::new(InconsistentFactory {
            lying_exhaustion: false,
        }),
    ))
    .unwrap();
    collection.add_new_cohort(A, 10, 1.0, None, &AttrMap::new());

    assert_eq!(
        collection.grow(false, true),
        Err(GrowError::SequenceInconsistent { species: A })
    );
}

#[test]
fn sequence_lying_after_exhaustion_is_an_error() {
    let mut collection = SiteCohorts::new(SiteConfig::new(
        SITE,
        Box::new(InconsistentFactory {
            lying_exhaustion: true,
        }),
    ))
    .unwrap();
    collection.add_new_cohort(A, 10, 1.0, None, &AttrMap::new());

    assert_eq!(
        collection.grow(false, true),
        Err(GrowError::SequenceInconsistent { species: A })
    );
}
