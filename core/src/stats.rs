//! Run statistics — plain counters, no decision logic.
//!
//! Mutated incrementally by the reconciliation passes, read once at the end
//! for the summary report. Never persisted. The inventory side leaves
//! `synced` and `wiped` at zero.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SideStats {
    /// Quantity of targeted items removed.
    pub removed: u64,
    /// Quantity of items pruned for referencing an id absent from the catalog.
    pub pruned: u64,
    /// Stub entries (non-positive amount) dropped.
    pub stub: u64,
    /// Storage records whose sync counter was repaired.
    pub synced: u64,
    /// Storage records deleted outright after becoming empty.
    pub wiped: u64,
    /// Characters / accounts with at least one dropped stack.
    pub affected: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub inventory: SideStats,
    pub storage: SideStats,
}

impl RunStats {
    /// Whether the run changed anything at all.
    pub fn is_clean(&self) -> bool {
        self == &RunStats::default()
    }
}
