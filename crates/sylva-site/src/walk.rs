//! The traversal working list: a linear-scan priority list of per-species
//! walk cursors, ordered oldest first.
//!
//! Sites typically hold a handful of species, so a sorted `SmallVec` with
//! linear-scan insertion beats a heap here; the insertion rule is also
//! what pins down the deterministic tie-break (equal ages keep the order
//! in which their entries were inserted).

use smallvec::SmallVec;

/// One entry of the working list: a sequence's index in the collection
/// plus the age of the cohort its walk cursor is currently on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WalkEntry {
    /// Index into the collection's sequence vector.
    pub seq: usize,
    /// Age of the cursor's current cohort.
    pub age: u32,
}

/// Working list, inline up to eight species.
pub(crate) type WalkList = SmallVec<[WalkEntry; 8]>;

/// Insert `entry` keeping the list sorted by age, strictly descending.
///
/// The entry goes before the first existing entry whose age is strictly
/// less than its own, or at the end if there is none. Entries with equal
/// ages therefore keep insertion order, which is what makes the merged
/// traversal deterministic.
pub(crate) fn insert_descending(list: &mut WalkList, entry: WalkEntry) {
    let at = list
        .iter()
        .position(|existing| entry.age > existing.age)
        .unwrap_or(list.len());
    list.insert(at, entry);
}
