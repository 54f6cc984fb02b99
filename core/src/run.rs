//! The fixed pipeline: catalog, flags and targets, inventory pass, storage
//! pass. Each pass finalizes its sink before the next begins, so a store is
//! either fully committed or untouched.

use crate::{
    catalog::CatalogIndex,
    cli::RunFlags,
    error::SweepResult,
    inventory::sweep_inventory,
    stats::RunStats,
    storage::sweep_storage,
    store::SweepStore,
    sweep::{RecordSink, SweepContext},
    targets::{parse_targets, RemovalSet},
};

/// What a finished run reports back to the caller.
#[derive(Debug)]
pub struct RunReport {
    pub stats: RunStats,
    pub dry_run: bool,
    pub target_count: usize,
}

/// Run the whole sweep against `store` with the given token list
/// (everything after host-level arguments, flags included).
pub fn execute(store: &SweepStore, tokens: &[String]) -> SweepResult<RunReport> {
    let (flags, target_tokens) = RunFlags::parse(tokens)?;

    let catalog = CatalogIndex::build(store.read_catalog()?);
    log::debug!("catalog index built: {} items", catalog.len());

    let targets = if flags.clean_only {
        log::info!("clean-only mode: no items targeted, repairing inconsistencies only");
        RemovalSet::new()
    } else {
        let targets = parse_targets(&target_tokens, &catalog)?;
        log::info!("the following items will be removed:");
        for id in targets.iter() {
            log::info!("[{id}]: {}", catalog.label(id));
        }
        targets
    };

    let ctx = SweepContext {
        catalog: &catalog,
        targets: &targets,
    };
    let mut stats = RunStats::default();

    let mut char_sink = store.character_sink();
    sweep_inventory(store.read_characters()?, &mut char_sink, &ctx, &mut stats)?;
    char_sink.finalize(flags.dry_run)?;

    let mut storage_sink = store.storage_sink();
    sweep_storage(store.read_storages()?, &mut storage_sink, &ctx, &mut stats)?;
    storage_sink.finalize(flags.dry_run)?;

    Ok(RunReport {
        stats,
        dry_run: flags.dry_run,
        target_count: targets.len(),
    })
}
