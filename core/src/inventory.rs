//! Inventory pass: character records are filtered but never deleted.
//!
//! Every record reaches the write sink, modified or not; the sink's
//! finalize decides what is actually persisted.

use crate::{
    error::SweepResult,
    record::{CharacterRecord, ItemStack},
    stats::RunStats,
    sweep::{self, RecordSink, SweepContext, SweepRecord},
};

impl SweepRecord for CharacterRecord {
    fn stacks_mut(&mut self) -> &mut Vec<ItemStack> {
        &mut self.items
    }

    fn owner(&self) -> String {
        format!(
            "inventory of character {} [{}:{}]",
            self.name, self.account_id, self.char_id
        )
    }
}

/// Filter every character record against the catalog and removal set.
pub fn sweep_inventory<I, S>(
    records: I,
    sink: &mut S,
    ctx: &SweepContext<'_>,
    stats: &mut RunStats,
) -> SweepResult<()>
where
    I: IntoIterator<Item = CharacterRecord>,
    S: RecordSink<CharacterRecord> + ?Sized,
{
    sweep::sweep(records, sink, ctx, &mut stats.inventory)
}
