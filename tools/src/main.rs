//! sweep-runner: offline item sweep over a database export.
//!
//! Usage:
//!   sweep-runner --db export.db Apple 1200-1250 "Rusty Sword"
//!   sweep-runner --db export.db --dry-run 501,502,503
//!   sweep-runner --db export.db --clean-only

use anyhow::{bail, Result};
use itemsweep_core::{run, store::SweepStore};
use std::env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    let Some(db) = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].clone())
    else {
        eprintln!("usage: sweep-runner --db <path> [--dry-run] [--clean-only] <items...>");
        eprintln!("  items: ids, names, comma lists, and inclusive ranges (e.g. 1200-1250)");
        bail!("missing --db <path>");
    };

    // Everything except the --db pair goes to the core token parser.
    let mut tokens = Vec::with_capacity(args.len());
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--db" {
            skip_next = true;
            continue;
        }
        tokens.push(arg.clone());
    }

    println!("item sweep — {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("  db: {db}");
    println!();

    let store = SweepStore::open(&db)?;
    store.migrate()?;

    let report = run::execute(&store, &tokens)?;
    let inv = report.stats.inventory;
    let sto = report.stats.storage;

    println!();
    println!("=== all done ===");
    println!(
        "removed {} existent, {} non-existent and {} stub items from the inventory of {} characters",
        inv.removed, inv.pruned, inv.stub, inv.affected
    );
    println!(
        "removed {} existent, {} non-existent and {} stub items from the storage of {} accounts",
        sto.removed, sto.pruned, sto.stub, sto.affected
    );
    println!("removed {} empty storage entries from the storage db", sto.wiped);
    println!("fixed storage sync of {} accounts", sto.synced);

    if report.dry_run {
        println!();
        println!("(DRY RUN) no data modified");
    }

    Ok(())
}
