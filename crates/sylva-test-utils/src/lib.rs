//! Test utilities and scripted fixtures for Sylva development.
//!
//! Provides an in-memory [`CohortSequence`](sylva_core::CohortSequence)
//! implementation with scriptable growth behavior, canned disturbances
//! and observers, and shared logs for asserting on cross-species
//! ordering.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{
    new_event_log, new_grow_log, new_seed_sink, ClearCut, EventLog, GrowLog, InconsistentFactory,
    InconsistentSequence, RecordingObserver, ScriptedFactory, ScriptedSequence, SeedSink,
    UniformHarvest,
};
