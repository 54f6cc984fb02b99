//! Inventory pass semantics: disposition priority, per-character counters,
//! order preservation, and the keep-always write policy.

use itemsweep_core::{
    catalog::{CatalogEntry, CatalogIndex},
    error::SweepResult,
    inventory::sweep_inventory,
    record::{CharacterRecord, ItemStack},
    stats::RunStats,
    sweep::{RecordSink, SweepContext},
    targets::RemovalSet,
};

fn index(ids: &[i64]) -> CatalogIndex {
    CatalogIndex::build(ids.iter().map(|id| CatalogEntry {
        id: *id,
        name: format!("item-{id}"),
    }))
}

fn removal(ids: &[i64]) -> RemovalSet {
    let mut set = RemovalSet::new();
    for id in ids {
        set.insert(*id);
    }
    set
}

fn character(items: Vec<ItemStack>) -> CharacterRecord {
    CharacterRecord {
        char_id: 150_001,
        account_id: 2_000_001,
        name: "Lena".into(),
        items,
    }
}

#[derive(Default)]
struct VecSink(Vec<CharacterRecord>);

impl RecordSink<CharacterRecord> for VecSink {
    fn write(&mut self, record: &CharacterRecord) -> SweepResult<()> {
        self.0.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self, _dry_run: bool) -> SweepResult<()> {
        Ok(())
    }
}

fn run(
    records: Vec<CharacterRecord>,
    catalog: &CatalogIndex,
    targets: &RemovalSet,
) -> (Vec<CharacterRecord>, RunStats) {
    let ctx = SweepContext { catalog, targets };
    let mut stats = RunStats::default();
    let mut sink = VecSink::default();
    sweep_inventory(records, &mut sink, &ctx, &mut stats).unwrap();
    (sink.0, stats)
}

// ─────────────────────────────────────────────────────────────────────────────
// Disposition priority: unknown → stub → targeted → keep
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn prunes_unknown_and_drops_stub_in_one_pass() {
    let catalog = index(&[7]);
    let targets = removal(&[]);
    let records = vec![character(vec![
        ItemStack::new(7, 2),
        ItemStack::new(999, 1),
        ItemStack::new(7, 0),
    ])];

    let (written, stats) = run(records, &catalog, &targets);

    assert_eq!(written.len(), 1);
    assert_eq!(written[0].items, vec![ItemStack::new(7, 2)]);
    assert_eq!(stats.inventory.pruned, 1);
    assert_eq!(stats.inventory.stub, 1);
    assert_eq!(stats.inventory.removed, 0);
    assert_eq!(stats.inventory.affected, 1);
}

#[test]
fn unknown_item_with_zero_amount_counts_as_one_pruned() {
    let catalog = index(&[]);
    let targets = removal(&[]);
    let records = vec![character(vec![ItemStack::new(999, 0)])];

    let (_, stats) = run(records, &catalog, &targets);

    assert_eq!(stats.inventory.pruned, 1);
    assert_eq!(stats.inventory.stub, 0);
}

#[test]
fn targeted_removal_counts_quantity() {
    let catalog = index(&[7, 8]);
    let targets = removal(&[7]);
    let records = vec![character(vec![
        ItemStack::new(7, 5),
        ItemStack::new(8, 3),
    ])];

    let (written, stats) = run(records, &catalog, &targets);

    assert_eq!(written[0].items, vec![ItemStack::new(8, 3)]);
    assert_eq!(stats.inventory.removed, 5);
}

#[test]
fn duplicate_non_stacking_entries_are_judged_independently() {
    let catalog = index(&[7]);
    let targets = removal(&[7]);
    let records = vec![character(vec![
        ItemStack::new(7, 1),
        ItemStack::new(7, 1),
    ])];

    let (written, stats) = run(records, &catalog, &targets);

    assert!(written[0].items.is_empty());
    assert_eq!(stats.inventory.removed, 2);
    assert_eq!(stats.inventory.affected, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Record handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn kept_items_preserve_relative_order() {
    let catalog = index(&[1, 2, 3, 4]);
    let targets = removal(&[2]);
    let records = vec![character(vec![
        ItemStack::new(4, 1),
        ItemStack::new(2, 1),
        ItemStack::new(1, 1),
        ItemStack::new(3, 1),
    ])];

    let (written, _) = run(records, &catalog, &targets);

    let ids: Vec<i64> = written[0].items.iter().map(|s| s.item_id).collect();
    assert_eq!(ids, vec![4, 1, 3]);
}

#[test]
fn unmodified_character_is_still_written_and_not_counted() {
    let catalog = index(&[7]);
    let targets = removal(&[]);
    let records = vec![character(vec![ItemStack::new(7, 2)])];

    let (written, stats) = run(records, &catalog, &targets);

    assert_eq!(written.len(), 1);
    assert!(stats.is_clean());
}

#[test]
fn affected_counts_characters_not_items() {
    let catalog = index(&[7]);
    let targets = removal(&[7]);
    let dirty = character(vec![ItemStack::new(7, 1), ItemStack::new(7, 1)]);
    let clean = CharacterRecord {
        char_id: 150_002,
        account_id: 2_000_002,
        name: "Moro".into(),
        items: vec![],
    };

    let (_, stats) = run(vec![dirty, clean], &catalog, &targets);

    assert_eq!(stats.inventory.affected, 1);
}

#[test]
fn opaque_stack_fields_survive_the_pass() {
    let catalog = index(&[7]);
    let targets = removal(&[]);
    let mut stack = ItemStack::new(7, 2);
    stack.extra = serde_json::json!({ "refine": 4, "card0": 4001 });
    let records = vec![character(vec![stack.clone()])];

    let (written, _) = run(records, &catalog, &targets);

    assert_eq!(written[0].items[0].extra, stack.extra);
}
