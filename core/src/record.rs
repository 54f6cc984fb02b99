//! Record types for the two persisted stores.
//!
//! Inventory and storage stacks are structurally identical: an item id, a
//! quantity, and whatever per-stack columns the export carries that the
//! sweep does not interpret. The opaque part rides along as a JSON value and
//! is rewritten verbatim.

use crate::types::{AccountId, CharId, ItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub amount: i64,
    #[serde(default)]
    pub extra: serde_json::Value,
}

impl ItemStack {
    pub fn new(item_id: ItemId, amount: i64) -> Self {
        Self {
            item_id,
            amount,
            extra: serde_json::Value::Null,
        }
    }
}

/// One character and its inventory. Items do not stack: the list may hold
/// multiple entries for the same item id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterRecord {
    pub char_id: CharId,
    pub account_id: AccountId,
    pub name: String,
    pub items: Vec<ItemStack>,
}

/// One account's shared storage. `stored_count` is the persisted sync
/// counter, which can drift from `items.len()` and is repaired on sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageRecord {
    pub account_id: AccountId,
    pub stored_count: i64,
    pub items: Vec<ItemStack>,
}
