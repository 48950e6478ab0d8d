//! Scripted cohort-sequence fixtures.
//!
//! Four standard fixtures for collection and traversal testing:
//!
//! - [`ScriptedSequence`] — an in-memory sequence with configurable
//!   mortality, recruitment, and a shared grow-order log.
//! - [`ScriptedFactory`] — builds `ScriptedSequence`s lazily for a
//!   collection, optionally capturing the seeds it receives.
//! - [`InconsistentSequence`] — deliberately violates the sequence
//!   contract (claims cohorts but exposes none) to exercise the
//!   traversal's consistency guard.
//! - [`UniformHarvest`] / [`ClearCut`] / [`RecordingObserver`] — canned
//!   disturbances and an observer, all writing into a shared event log
//!   so tests can assert on notification-before-removal ordering.

use std::cell::RefCell;
use std::rc::Rc;

use sylva_core::{
    AttrMap, CohortDisturbance, CohortSeed, CohortSequence, CohortView, Disturbance,
    DisturbanceKind, DisturbanceObserver, GrowthContext, SequenceFactory, SiteId,
    SpeciesDisturbance, SpeciesId,
};

/// Shared record of `(species, age)` pairs in the order cohorts were
/// grown, across every sequence holding a clone of the log.
pub type GrowLog = Rc<RefCell<Vec<(SpeciesId, u32)>>>;

/// A fresh, empty grow log.
pub fn new_grow_log() -> GrowLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Shared free-form event record for disturbance tests.
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// A fresh, empty event log.
pub fn new_event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Shared capture of the seeds a [`ScriptedFactory`] receives.
pub type SeedSink = Rc<RefCell<Vec<(SpeciesId, CohortSeed)>>>;

/// A fresh, empty seed sink.
pub fn new_seed_sink() -> SeedSink {
    Rc::new(RefCell::new(Vec::new()))
}

struct FixtureCohort {
    age: u32,
    biomass: f64,
    attrs: AttrMap,
}

/// An in-memory cohort sequence with scriptable behavior.
///
/// Growth logs the cohort, applies the context's growth reduction to
/// its biomass, and ages it by one year. Cohorts listed in
/// `die_when_grown` (by pre-growth age) are removed after growing, as
/// are cohorts whose biomass reaches zero. Recruits can be scheduled to
/// appear when a given cohort grows; they join the sequence only once
/// the year's walk exhausts it, which is how the traversal's
/// recruits-after-exhaustion path gets exercised.
pub struct ScriptedSequence {
    species: SpeciesId,
    cohorts: Vec<FixtureCohort>,
    cursor: usize,
    removed_current: bool,
    mature_age: u32,
    mature_present: bool,
    grow_log: Option<GrowLog>,
    die_when_grown: Vec<u32>,
    recruits: Vec<(u32, CohortSeed)>,
    pending_recruits: Vec<CohortSeed>,
}

impl ScriptedSequence {
    /// A sequence over `(age, biomass)` pairs, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the ages are not strictly descending.
    pub fn new(species: SpeciesId, cohorts: &[(u32, f64)]) -> Self {
        assert!(
            cohorts.windows(2).all(|w| w[0].0 > w[1].0),
            "fixture cohorts must be oldest first with strictly descending ages"
        );
        let cohorts = cohorts
            .iter()
            .map(|&(age, biomass)| FixtureCohort {
                age,
                biomass,
                attrs: AttrMap::new(),
            })
            .collect();
        let mut sequence = Self {
            species,
            cohorts,
            cursor: 0,
            removed_current: false,
            mature_age: 0,
            mature_present: false,
            grow_log: None,
            die_when_grown: Vec::new(),
            recruits: Vec::new(),
            pending_recruits: Vec::new(),
        };
        sequence.refresh_mature_present();
        sequence
    }

    /// A single-cohort sequence from a factory seed.
    pub fn from_seed(species: SpeciesId, seed: CohortSeed) -> Self {
        let mut sequence = Self::new(species, &[]);
        sequence.insert_sorted(seed);
        sequence.refresh_mature_present();
        sequence
    }

    /// Record every grown cohort into `log`.
    pub fn with_grow_log(mut self, log: GrowLog) -> Self {
        self.grow_log = Some(log);
        self
    }

    /// Cohorts are mature at `age` and older.
    pub fn with_mature_age(mut self, age: u32) -> Self {
        self.mature_age = age;
        self.refresh_mature_present();
        self
    }

    /// Cohorts with these pre-growth ages die right after growing.
    pub fn with_death_when_grown(mut self, ages: &[u32]) -> Self {
        self.die_when_grown = ages.to_vec();
        self
    }

    /// Schedule `recruit` to appear when the cohort aged `trigger_age`
    /// (pre-growth) grows.
    pub fn with_recruit_when_grown(mut self, trigger_age: u32, recruit: CohortSeed) -> Self {
        self.recruits.push((trigger_age, recruit));
        self
    }

    fn insert_sorted(&mut self, seed: CohortSeed) {
        if let Some(existing) = self.cohorts.iter_mut().find(|c| c.age == seed.age) {
            existing.biomass += seed.biomass;
            return;
        }
        let at = self
            .cohorts
            .iter()
            .position(|c| seed.age > c.age)
            .unwrap_or(self.cohorts.len());
        self.cohorts.insert(
            at,
            FixtureCohort {
                age: seed.age,
                biomass: seed.biomass,
                attrs: seed.attrs,
            },
        );
    }
}

impl CohortSequence for ScriptedSequence {
    fn species(&self) -> SpeciesId {
        self.species
    }

    fn len(&self) -> usize {
        self.cohorts.len()
    }

    fn oldest_age(&self) -> Option<u32> {
        self.cohorts.first().map(|c| c.age)
    }

    fn ages(&self) -> Vec<u32> {
        self.cohorts.iter().map(|c| c.age).collect()
    }

    fn is_mature_present(&self) -> bool {
        self.mature_present
    }

    fn refresh_mature_present(&mut self) {
        self.mature_present = self.cohorts.iter().any(|c| c.age >= self.mature_age);
    }

    fn combine_young(&mut self, succession_timestep: u32) {
        let mut combined = 0.0;
        let mut any = false;
        self.cohorts.retain(|c| {
            if c.age < succession_timestep {
                combined += c.biomass;
                any = true;
                false
            } else {
                true
            }
        });
        if !any {
            return;
        }
        self.insert_sorted(CohortSeed {
            age: succession_timestep,
            biomass: combined,
            anpp: None,
            attrs: AttrMap::new(),
        });
    }

    fn add_cohort(&mut self, seed: CohortSeed) {
        self.insert_sorted(seed);
        self.refresh_mature_present();
    }

    fn walk_start(&mut self) -> Option<u32> {
        self.cursor = 0;
        self.removed_current = false;
        self.oldest_age()
    }

    fn grow_current(&mut self, ctx: &GrowthContext<'_>) {
        let pre_age = self.cohorts[self.cursor].age;
        if let Some(log) = &self.grow_log {
            log.borrow_mut().push((self.species, pre_age));
        }

        let fraction = {
            let c = &self.cohorts[self.cursor];
            ctx.growth_reduction(CohortView {
                species: self.species,
                age: c.age,
                biomass: c.biomass,
                attrs: &c.attrs,
            })
        };
        let c = &mut self.cohorts[self.cursor];
        c.biomass *= 1.0 - fraction;
        c.age += 1;

        if self.die_when_grown.contains(&pre_age) || self.cohorts[self.cursor].biomass <= 0.0 {
            self.cohorts.remove(self.cursor);
            self.removed_current = true;
        }

        let due = self
            .recruits
            .iter()
            .filter(|(trigger, _)| *trigger == pre_age)
            .map(|(_, seed)| seed.clone());
        self.pending_recruits.extend(due);
    }

    fn walk_advance(&mut self) -> Option<u32> {
        if self.removed_current {
            self.removed_current = false;
        } else {
            self.cursor += 1;
        }
        match self.cohorts.get(self.cursor) {
            Some(c) => Some(c.age),
            None => {
                // Walk exhausted: recruits spawned during growth join
                // the sequence now, un-walked this year.
                for seed in std::mem::take(&mut self.pending_recruits) {
                    self.insert_sorted(seed);
                }
                None
            }
        }
    }

    fn mark_cohorts(&mut self, disturbance: &mut dyn CohortDisturbance) -> f64 {
        let mut total = 0.0;
        for i in (0..self.cohorts.len()).rev() {
            let amount = {
                let c = &self.cohorts[i];
                disturbance.reduce(CohortView {
                    species: self.species,
                    age: c.age,
                    biomass: c.biomass,
                    attrs: &c.attrs,
                })
            };
            let amount = amount.clamp(0.0, self.cohorts[i].biomass);
            self.cohorts[i].biomass -= amount;
            total += amount;
            if self.cohorts[i].biomass <= 0.0 {
                self.cohorts.remove(i);
            }
        }
        total
    }

    fn mark_species_cohorts(&mut self, disturbance: &mut dyn SpeciesDisturbance) -> f64 {
        let ages = self.ages();
        let mut killed = vec![false; ages.len()];
        disturbance.mark_for_death(self.species, &ages, &mut killed);
        let mut total = 0.0;
        for i in (0..self.cohorts.len()).rev() {
            if killed[i] {
                total += self.cohorts[i].biomass;
                self.cohorts.remove(i);
            }
        }
        total
    }
}

/// Builds [`ScriptedSequence`]s for a collection's lazy entry creation.
///
/// Scripted behaviors are keyed by species so an entire multi-species
/// scenario can be driven through the collection's own insertion API.
#[derive(Default)]
pub struct ScriptedFactory {
    /// Maturity age handed to every created sequence.
    pub mature_age: u32,
    /// Grow log cloned into every created sequence.
    pub grow_log: Option<GrowLog>,
    /// Captures `(species, seed)` for every `create` call.
    pub seed_sink: Option<SeedSink>,
    /// `(species, pre-growth age)` cohorts that die right after growing.
    pub death_when_grown: Vec<(SpeciesId, u32)>,
    /// `(species, trigger age, recruit)` recruits spawned when the
    /// trigger cohort grows.
    pub recruits_when_grown: Vec<(SpeciesId, u32, CohortSeed)>,
}

impl SequenceFactory for ScriptedFactory {
    fn create(&self, species: SpeciesId, seed: CohortSeed) -> Box<dyn CohortSequence> {
        if let Some(sink) = &self.seed_sink {
            sink.borrow_mut().push((species, seed.clone()));
        }
        let death_ages: Vec<u32> = self
            .death_when_grown
            .iter()
            .filter(|(s, _)| *s == species)
            .map(|(_, age)| *age)
            .collect();
        let mut sequence = ScriptedSequence::from_seed(species, seed)
            .with_mature_age(self.mature_age)
            .with_death_when_grown(&death_ages);
        for (s, trigger, recruit) in &self.recruits_when_grown {
            if *s == species {
                sequence = sequence.with_recruit_when_grown(*trigger, recruit.clone());
            }
        }
        if let Some(log) = &self.grow_log {
            sequence = sequence.with_grow_log(log.clone());
        }
        Box::new(sequence)
    }
}

/// A sequence that claims cohorts but exposes none.
///
/// Violates the `CohortSequence` contract on purpose so tests can
/// assert the traversal surfaces `GrowError::SequenceInconsistent`
/// instead of looping or silently skipping the species.
pub struct InconsistentSequence {
    species: SpeciesId,
    walk_once: bool,
    started: bool,
}

impl InconsistentSequence {
    /// Lies from the start: `len() == 1` but `walk_start()` finds
    /// nothing. Trips the traversal's setup guard.
    pub fn empty_walk(species: SpeciesId) -> Self {
        Self {
            species,
            walk_once: false,
            started: false,
        }
    }

    /// Walks one cohort, then keeps claiming `len() == 1` while
    /// exposing no oldest cohort. Trips the post-exhaustion guard.
    pub fn lying_exhaustion(species: SpeciesId) -> Self {
        Self {
            species,
            walk_once: true,
            started: false,
        }
    }
}

impl CohortSequence for InconsistentSequence {
    fn species(&self) -> SpeciesId {
        self.species
    }

    fn len(&self) -> usize {
        1
    }

    fn oldest_age(&self) -> Option<u32> {
        if self.walk_once && !self.started {
            Some(10)
        } else {
            None
        }
    }

    fn ages(&self) -> Vec<u32> {
        Vec::new()
    }

    fn is_mature_present(&self) -> bool {
        false
    }

    fn refresh_mature_present(&mut self) {}

    fn combine_young(&mut self, _succession_timestep: u32) {}

    fn add_cohort(&mut self, _seed: CohortSeed) {}

    fn walk_start(&mut self) -> Option<u32> {
        if self.walk_once && !self.started {
            Some(10)
        } else {
            None
        }
    }

    fn grow_current(&mut self, _ctx: &GrowthContext<'_>) {
        self.started = true;
    }

    fn walk_advance(&mut self) -> Option<u32> {
        None
    }

    fn mark_cohorts(&mut self, _disturbance: &mut dyn CohortDisturbance) -> f64 {
        0.0
    }

    fn mark_species_cohorts(&mut self, _disturbance: &mut dyn SpeciesDisturbance) -> f64 {
        0.0
    }
}

/// Factory producing a single [`InconsistentSequence`] variant.
pub struct InconsistentFactory {
    /// Build the `lying_exhaustion` variant instead of `empty_walk`.
    pub lying_exhaustion: bool,
}

impl SequenceFactory for InconsistentFactory {
    fn create(&self, species: SpeciesId, _seed: CohortSeed) -> Box<dyn CohortSequence> {
        if self.lying_exhaustion {
            Box::new(InconsistentSequence::lying_exhaustion(species))
        } else {
            Box::new(InconsistentSequence::empty_walk(species))
        }
    }
}

/// A cohort-level disturbance removing the same fraction of every
/// cohort's biomass.
pub struct UniformHarvest {
    site: SiteId,
    kind: DisturbanceKind,
    fraction: f64,
    events: Option<EventLog>,
}

impl UniformHarvest {
    /// Harvest removing `fraction` of each cohort's biomass.
    pub fn new(site: SiteId, fraction: f64) -> Self {
        Self {
            site,
            kind: DisturbanceKind::new("harvest"),
            fraction,
            events: None,
        }
    }

    /// Record every reduction into `events`.
    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }
}

impl Disturbance for UniformHarvest {
    fn site(&self) -> SiteId {
        self.site
    }

    fn kind(&self) -> &DisturbanceKind {
        &self.kind
    }
}

impl CohortDisturbance for UniformHarvest {
    fn reduce(&mut self, cohort: CohortView<'_>) -> f64 {
        if let Some(events) = &self.events {
            events
                .borrow_mut()
                .push(format!("reduce {}:{}", cohort.species, cohort.age));
        }
        cohort.biomass * self.fraction
    }
}

/// A species-level disturbance killing every cohort of its target
/// species (or of all species when no target is set).
pub struct ClearCut {
    site: SiteId,
    kind: DisturbanceKind,
    target: Option<SpeciesId>,
    events: Option<EventLog>,
}

impl ClearCut {
    /// Kill every cohort of every species.
    pub fn all(site: SiteId) -> Self {
        Self {
            site,
            kind: DisturbanceKind::new("clearcut"),
            target: None,
            events: None,
        }
    }

    /// Kill every cohort of `species` only.
    pub fn of(site: SiteId, species: SpeciesId) -> Self {
        Self {
            target: Some(species),
            ..Self::all(site)
        }
    }

    /// Record every marking into `events`.
    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }
}

impl Disturbance for ClearCut {
    fn site(&self) -> SiteId {
        self.site
    }

    fn kind(&self) -> &DisturbanceKind {
        &self.kind
    }
}

impl SpeciesDisturbance for ClearCut {
    fn mark_for_death(&mut self, species: SpeciesId, ages: &[u32], killed: &mut [bool]) {
        if self.target.is_some_and(|target| target != species) {
            return;
        }
        if let Some(events) = &self.events {
            events
                .borrow_mut()
                .push(format!("mark {species} ({} cohorts)", ages.len()));
        }
        killed.fill(true);
    }
}

/// An observer that records each notification into a shared event log.
pub struct RecordingObserver {
    label: String,
    events: EventLog,
}

impl RecordingObserver {
    /// An observer writing `"<label> saw <kind>@<site>"` lines.
    pub fn new(label: impl Into<String>, events: EventLog) -> Self {
        Self {
            label: label.into(),
            events,
        }
    }
}

impl DisturbanceObserver for RecordingObserver {
    fn on_disturbance(&mut self, site: SiteId, kind: &DisturbanceKind) {
        self.events
            .borrow_mut()
            .push(format!("{} saw {kind}@{site}", self.label));
    }
}
