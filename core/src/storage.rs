//! Storage pass: sync-counter repair and delete-if-empty.
//!
//! Storage tracks a slot count, not total quantity: every dropped stack
//! decrements `stored_count` by exactly 1. The running decrement is only a
//! fast-path estimate — after filtering, the actual item count is the
//! authoritative value, and any mismatch is repaired and counted as a
//! resync. A record left empty is not written at all; finalize treats
//! "not staged" as "deleted".

use crate::{
    error::SweepResult,
    record::{ItemStack, StorageRecord},
    stats::{RunStats, SideStats},
    sweep::{self, RecordSink, SweepContext, SweepOutcome, SweepRecord},
};

impl SweepRecord for StorageRecord {
    fn stacks_mut(&mut self) -> &mut Vec<ItemStack> {
        &mut self.items
    }

    fn owner(&self) -> String {
        format!("storage of account {}", self.account_id)
    }

    fn note_drop(&mut self) {
        self.stored_count -= 1;
    }

    fn settle(&mut self, side: &mut SideStats) -> SweepOutcome {
        let actual = self.items.len() as i64;
        if self.stored_count != actual {
            log::info!(
                "fixing sync of storage for account {}: {} => {}",
                self.account_id,
                self.stored_count,
                actual
            );
            self.stored_count = actual;
            side.synced += 1;
        }

        if self.stored_count >= 1 {
            SweepOutcome::Write
        } else {
            log::info!(
                "storage of account {} is now empty: removing it from the storage db",
                self.account_id
            );
            side.wiped += 1;
            SweepOutcome::Discard
        }
    }
}

/// Filter every storage record against the catalog and removal set.
pub fn sweep_storage<I, S>(
    records: I,
    sink: &mut S,
    ctx: &SweepContext<'_>,
    stats: &mut RunStats,
) -> SweepResult<()>
where
    I: IntoIterator<Item = StorageRecord>,
    S: RecordSink<StorageRecord> + ?Sized,
{
    sweep::sweep(records, sink, ctx, &mut stats.storage)
}
