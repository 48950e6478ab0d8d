//! Core types and traits for the Sylva forest succession library.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Sylva workspace:
//! type IDs, the cohort attribute bag, disturbance contracts, error
//! types, and the collaborator traits implemented by species cohort
//! sequences and growth-reduction strategies.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attrs;
pub mod cohort;
pub mod disturbance;
pub mod error;
pub mod id;
pub mod traits;

pub use attrs::{deep_clone_attrs, AttrMap, AttrValue};
pub use cohort::{CohortSeed, CohortView};
pub use disturbance::{
    CohortDisturbance, Disturbance, DisturbanceKind, DisturbanceObserver, SpeciesDisturbance,
};
pub use error::{GrowError, PoolError};
pub use id::{SiteId, SpeciesId};
pub use traits::{CohortSequence, GrowthContext, GrowthReduction, SequenceFactory};
