//! Shared primitive types used across the sweep.

/// An item id from the item catalog. SQLite integer affinity, so i64.
pub type ItemId = i64;

/// An account id owning a storage record (and one or more characters).
pub type AccountId = i64;

/// A character id owning an inventory.
pub type CharId = i64;
