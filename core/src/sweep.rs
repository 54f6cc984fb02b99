//! The reconciliation engine shared by both record stores.
//!
//! RULE: the two passes differ only in their record type. All filtering,
//! counting and logging lives here; per-kind behavior (sync-counter
//! bookkeeping, keep-always vs delete-if-empty) hangs off the `SweepRecord`
//! trait so the passes cannot drift apart.

use crate::{
    catalog::CatalogIndex,
    error::SweepResult,
    record::ItemStack,
    stats::SideStats,
    targets::RemovalSet,
};

/// What happens to one item stack. Evaluated in this priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Item id absent from the catalog: drop, count the quantity as pruned.
    Pruned,
    /// Non-positive amount: drop, count one stub.
    Stub,
    /// Member of the removal set: drop, count the quantity as removed.
    Targeted,
    /// None of the above: retain unchanged.
    Keep,
}

/// Whether a settled record reaches the write sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    Write,
    Discard,
}

/// A staged write sink. `write` stages a record; `finalize` commits all
/// staged records, or discards them without mutation when `dry_run` is set.
pub trait RecordSink<R> {
    fn write(&mut self, record: &R) -> SweepResult<()>;
    fn finalize(&mut self, dry_run: bool) -> SweepResult<()>;
}

/// A record the engine can filter: stack access, an owner label for log
/// lines, and the per-kind hooks.
pub trait SweepRecord {
    fn stacks_mut(&mut self) -> &mut Vec<ItemStack>;

    /// Human-readable owner, e.g. "inventory of character Lena [2000001:150002]".
    fn owner(&self) -> String;

    /// Called once per dropped stack, before `settle`.
    fn note_drop(&mut self) {}

    /// Decide the record's fate after filtering. Default: always write.
    fn settle(&mut self, side: &mut SideStats) -> SweepOutcome {
        let _ = side;
        SweepOutcome::Write
    }
}

/// Read-only inputs shared by both passes.
pub struct SweepContext<'a> {
    pub catalog: &'a CatalogIndex,
    pub targets: &'a RemovalSet,
}

impl SweepContext<'_> {
    /// Classify one stack. Unknown-item takes priority over stub, stub over
    /// targeted, so an unknown item with zero amount counts as pruned.
    pub fn classify(&self, stack: &ItemStack) -> Disposition {
        if !self.catalog.contains(stack.item_id) {
            Disposition::Pruned
        } else if stack.amount < 1 {
            Disposition::Stub
        } else if self.targets.contains(stack.item_id) {
            Disposition::Targeted
        } else {
            Disposition::Keep
        }
    }
}

/// Run one full pass: filter every record, update counters, emit survivors
/// to the sink. The caller finalizes the sink afterwards.
pub fn sweep<R, I, S>(
    records: I,
    sink: &mut S,
    ctx: &SweepContext<'_>,
    side: &mut SideStats,
) -> SweepResult<()>
where
    R: SweepRecord,
    I: IntoIterator<Item = R>,
    S: RecordSink<R> + ?Sized,
{
    for mut record in records {
        let stacks = std::mem::take(record.stacks_mut());
        // Order-preserving filter, not a set: items don't stack, so the
        // same id may appear in several entries, each judged on its own.
        let mut kept = Vec::with_capacity(stacks.len());
        let mut modified = false;
        let owner = record.owner();

        for stack in stacks {
            match ctx.classify(&stack) {
                Disposition::Keep => kept.push(stack),
                disposition => {
                    tally(disposition, &stack, &owner, ctx, side);
                    record.note_drop();
                    modified = true;
                }
            }
        }

        *record.stacks_mut() = kept;
        if modified {
            side.affected += 1;
        }

        match record.settle(side) {
            SweepOutcome::Write => sink.write(&record)?,
            SweepOutcome::Discard => {}
        }
    }

    Ok(())
}

fn tally(
    disposition: Disposition,
    stack: &ItemStack,
    owner: &str,
    ctx: &SweepContext<'_>,
    side: &mut SideStats,
) {
    let id = stack.item_id;
    match disposition {
        Disposition::Pruned => {
            // A missing or zero amount still counts as one pruned entry.
            let quantity = stack.amount.max(1) as u64;
            side.pruned += quantity;
            log::info!("removing {quantity}x non-existent item id {id} from {owner}");
        }
        Disposition::Stub => {
            side.stub += 1;
            log::info!(
                "removing stub of item {} [{id}] from {owner}",
                ctx.catalog.label(id)
            );
        }
        Disposition::Targeted => {
            side.removed += stack.amount as u64;
            log::info!(
                "removing {}x {} [{id}] from {owner}",
                stack.amount,
                ctx.catalog.label(id)
            );
        }
        Disposition::Keep => {}
    }
}
