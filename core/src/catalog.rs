//! The item catalog index — bidirectional id↔name lookup.
//!
//! Built once at startup from the item db, read-only afterwards. Both
//! reconciliation passes need random-access lookup, so the catalog is fully
//! materialized rather than streamed.

use crate::{
    error::{SweepError, SweepResult},
    types::ItemId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
}

pub struct CatalogIndex {
    by_id: HashMap<ItemId, CatalogEntry>,
    by_name: HashMap<String, ItemId>,
}

impl CatalogIndex {
    /// Build the index from the catalog sequence.
    ///
    /// Duplicate names resolve last-entry-wins, with a warning naming both
    /// ids. Duplicate ids likewise overwrite.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();

        for entry in entries {
            if let Some(old_id) = by_name.insert(entry.name.clone(), entry.id) {
                if old_id != entry.id {
                    log::warn!(
                        "duplicate item name '{}': id {} replaces id {}",
                        entry.name,
                        entry.id,
                        old_id
                    );
                }
            }
            by_id.insert(entry.id, entry);
        }

        Self { by_id, by_name }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Whether `id` refers to an item in the current catalog build.
    pub fn contains(&self, id: ItemId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Resolve a CLI token to an item id.
    ///
    /// Numeric tokens pass through unchanged, without a catalog membership
    /// check: an id may validly refer to an item no longer in the catalog
    /// when the caller intends to remove orphaned references. Non-numeric
    /// tokens are looked up as names.
    pub fn resolve_to_id(&self, token: &str) -> SweepResult<ItemId> {
        if let Ok(id) = token.parse::<ItemId>() {
            return Ok(id);
        }
        self.by_name
            .get(token)
            .copied()
            .ok_or_else(|| SweepError::UnknownItemName {
                name: token.to_string(),
            })
    }

    /// Catalog name for `id`, failing if the id is not catalog-resident.
    pub fn resolve_to_display(&self, id: ItemId) -> SweepResult<&str> {
        self.by_id
            .get(&id)
            .map(|e| e.name.as_str())
            .ok_or(SweepError::UnknownItemId { id })
    }

    /// Logging label for `id`: the catalog name when resident, otherwise a
    /// bare-id placeholder. Never fails, so log lines for orphaned ids
    /// cannot abort a run.
    pub fn label(&self, id: ItemId) -> String {
        match self.by_id.get(&id) {
            Some(entry) => entry.name.clone(),
            None => format!("<unknown #{id}>"),
        }
    }
}
