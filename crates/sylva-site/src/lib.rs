//! Site-level orchestration for the Sylva forest succession library.
//!
//! [`SiteCohorts`] owns the per-species cohort sequences at one
//! landscape site and drives the merged growth traversal, cohort
//! insertion, and disturbance-driven reduction and removal.
//! [`DeadMassPool`] tracks decomposing dead biomass with a blended
//! decay rate.
//!
//! Everything here is purely sequential and single-threaded per site:
//! the surrounding driver guarantees at most one in-flight growth or
//! disturbance call per site, and parallelism belongs at the site
//! granularity (distinct sites share no mutable state).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collection;
pub mod config;
pub mod pool;
pub mod reduction;
mod walk;

pub use collection::{GrowthStats, SiteCohorts};
pub use config::{ConfigError, SiteConfig};
pub use pool::DeadMassPool;
pub use reduction::{FixedReduction, NoReduction};
