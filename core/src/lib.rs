//! itemsweep-core: offline reconciliation of character inventories and
//! account storage against the item catalog.
//!
//! The sweep removes an administrator-given set of item ids, prunes
//! references to items absent from the catalog, drops stub entries with
//! non-positive quantity, and repairs storage sync counters. One pass per
//! record store, no concurrency, all-or-nothing persistence.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod inventory;
pub mod record;
pub mod run;
pub mod stats;
pub mod storage;
pub mod store;
pub mod sweep;
pub mod targets;
pub mod types;
