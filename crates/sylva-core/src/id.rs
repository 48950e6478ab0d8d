//! Strongly-typed identifiers for species and sites.

use std::fmt;

/// Identifies a tree species within a simulation.
///
/// Species are registered by the surrounding driver and assigned
/// sequential IDs. Sylva never interprets the ID beyond equality;
/// it is the key under which a site tracks one cohort sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesId(pub u32);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SpeciesId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a landscape site (one grid cell of the surrounding model).
///
/// Sites are fully independent: each has its own cohort collection and
/// no shared mutable state with any other site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub u64);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SiteId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
