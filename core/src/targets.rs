//! Removal-set construction from CLI target clauses.

use crate::{catalog::CatalogIndex, error::SweepResult, types::ItemId};
use std::collections::HashSet;

/// The set of item ids targeted for removal.
///
/// Membership-tested during reconciliation; iterated in insertion order for
/// the human-readable target listing.
#[derive(Debug, Default, Clone)]
pub struct RemovalSet {
    order: Vec<ItemId>,
    members: HashSet<ItemId>,
}

impl RemovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ItemId) {
        if self.members.insert(id) {
            self.order.push(id);
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.order.iter().copied()
    }
}

/// Parse flag-stripped target tokens into a removal set.
///
/// Tokens are re-joined and re-split on commas, so `7 8,9` and `7,8,9` are
/// equivalent. A clause containing `-` or `..` is an inclusive range whose
/// endpoints resolve through the catalog; reversed endpoints are swapped.
/// Range expansion is purely numeric once the endpoints are resolved — a
/// name-to-name range spans the id interval between them, unrelated ids
/// included.
pub fn parse_targets(tokens: &[String], catalog: &CatalogIndex) -> SweepResult<RemovalSet> {
    let mut set = RemovalSet::new();

    let joined = tokens.join(",");
    for clause in joined.split(',') {
        if clause.is_empty() {
            continue;
        }

        let normalized = clause.replace("..", "-");
        if normalized.contains('-') {
            let parts: Vec<&str> = normalized.split('-').collect();
            let mut from = catalog.resolve_to_id(parts.first().copied().unwrap_or(""))?;
            let mut to = catalog.resolve_to_id(parts.get(1).copied().unwrap_or(""))?;

            if from > to {
                std::mem::swap(&mut from, &mut to);
            }
            for id in from..=to {
                set.insert(id);
            }
        } else {
            set.insert(catalog.resolve_to_id(&normalized)?);
        }
    }

    Ok(set)
}
