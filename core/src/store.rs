//! SQLite persistence layer.
//!
//! RULE: only store.rs talks to the database. The reconciliation passes see
//! record vectors and staged sinks, never SQL.
//!
//! Each sink buffers staged records in memory; `finalize(false)` rewrites
//! the corresponding tables inside one transaction, so a storage record
//! that was never staged disappears from the store. `finalize(true)`
//! discards the staged records without touching the database.

use crate::{
    catalog::CatalogEntry,
    error::SweepResult,
    record::{CharacterRecord, ItemStack, StorageRecord},
    sweep::RecordSink,
    types::AccountId,
};
use rusqlite::{params, Connection};

pub struct SweepStore {
    conn: Connection,
}

impl SweepStore {
    /// Open (or create) the export database at `path`.
    pub fn open(path: &str) -> SweepResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL only makes sense for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SweepResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply the schema. Idempotent.
    pub fn migrate(&self) -> SweepResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_schema.sql"))?;
        Ok(())
    }

    // ── Sources ────────────────────────────────────────────────

    /// Full item catalog, one pass.
    pub fn read_catalog(&self) -> SweepResult<Vec<CatalogEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM item_db ORDER BY id ASC")?;
        let entries = stmt
            .query_map([], |row| {
                Ok(CatalogEntry {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// All character records with their inventories, one pass.
    pub fn read_characters(&self) -> SweepResult<Vec<CharacterRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT char_id, account_id, name FROM char ORDER BY char_id ASC")?;
        let mut records = stmt
            .query_map([], |row| {
                Ok(CharacterRecord {
                    char_id: row.get(0)?,
                    account_id: row.get(1)?,
                    name: row.get(2)?,
                    items: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut item_stmt = self.conn.prepare(
            "SELECT nameid, amount, extra FROM inventory
             WHERE char_id = ?1 ORDER BY rowid ASC",
        )?;
        for record in &mut records {
            record.items = read_stacks(&mut item_stmt, record.char_id)?;
        }
        Ok(records)
    }

    /// All storage records with their items, one pass.
    pub fn read_storages(&self) -> SweepResult<Vec<StorageRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT account_id, storage_amount FROM storage ORDER BY account_id ASC")?;
        let mut records = stmt
            .query_map([], |row| {
                Ok(StorageRecord {
                    account_id: row.get(0)?,
                    stored_count: row.get(1)?,
                    items: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut item_stmt = self.conn.prepare(
            "SELECT nameid, amount, extra FROM storage_item
             WHERE account_id = ?1 ORDER BY rowid ASC",
        )?;
        for record in &mut records {
            record.items = read_stacks(&mut item_stmt, record.account_id)?;
        }
        Ok(records)
    }

    // ── Seeding (tests and import tooling) ─────────────────────

    pub fn insert_item(&self, id: i64, name: &str) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO item_db (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
        Ok(())
    }

    pub fn insert_character(&self, record: &CharacterRecord) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO char (char_id, account_id, name) VALUES (?1, ?2, ?3)",
            params![record.char_id, record.account_id, record.name],
        )?;
        for stack in &record.items {
            self.conn.execute(
                "INSERT INTO inventory (char_id, nameid, amount, extra) VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.char_id,
                    stack.item_id,
                    stack.amount,
                    serde_json::to_string(&stack.extra)?
                ],
            )?;
        }
        Ok(())
    }

    pub fn insert_storage(&self, record: &StorageRecord) -> SweepResult<()> {
        self.conn.execute(
            "INSERT INTO storage (account_id, storage_amount) VALUES (?1, ?2)",
            params![record.account_id, record.stored_count],
        )?;
        for stack in &record.items {
            self.conn.execute(
                "INSERT INTO storage_item (account_id, nameid, amount, extra)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.account_id,
                    stack.item_id,
                    stack.amount,
                    serde_json::to_string(&stack.extra)?
                ],
            )?;
        }
        Ok(())
    }

    // ── Counts (tests and summary) ─────────────────────────────

    pub fn inventory_stack_count(&self) -> SweepResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn storage_record_count(&self) -> SweepResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM storage", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn storage_stack_count(&self) -> SweepResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM storage_item", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn stored_count_for(&self, account_id: AccountId) -> SweepResult<Option<i64>> {
        use rusqlite::OptionalExtension;
        let n = self
            .conn
            .query_row(
                "SELECT storage_amount FROM storage WHERE account_id = ?1",
                params![account_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(n)
    }

    // ── Sinks ──────────────────────────────────────────────────

    pub fn character_sink(&self) -> CharacterSink<'_> {
        CharacterSink {
            store: self,
            staged: Vec::new(),
        }
    }

    pub fn storage_sink(&self) -> StorageSink<'_> {
        StorageSink {
            store: self,
            staged: Vec::new(),
        }
    }

    fn replace_inventories(&self, records: &[CharacterRecord]) -> SweepResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM inventory", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO inventory (char_id, nameid, amount, extra)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                for stack in &record.items {
                    stmt.execute(params![
                        record.char_id,
                        stack.item_id,
                        stack.amount,
                        serde_json::to_string(&stack.extra)?
                    ])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn replace_storages(&self, records: &[StorageRecord]) -> SweepResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM storage_item", [])?;
        tx.execute("DELETE FROM storage", [])?;
        {
            let mut storage_stmt = tx.prepare(
                "INSERT INTO storage (account_id, storage_amount) VALUES (?1, ?2)",
            )?;
            let mut item_stmt = tx.prepare(
                "INSERT INTO storage_item (account_id, nameid, amount, extra)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for record in records {
                storage_stmt.execute(params![record.account_id, record.stored_count])?;
                for stack in &record.items {
                    item_stmt.execute(params![
                        record.account_id,
                        stack.item_id,
                        stack.amount,
                        serde_json::to_string(&stack.extra)?
                    ])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn read_stacks(
    stmt: &mut rusqlite::Statement<'_>,
    owner_id: i64,
) -> SweepResult<Vec<ItemStack>> {
    let rows = stmt.query_map(params![owner_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;
    let mut stacks = Vec::new();
    for row in rows {
        let (item_id, amount, extra) = row?;
        stacks.push(ItemStack {
            item_id,
            amount,
            extra: serde_json::from_str(&extra)?,
        });
    }
    Ok(stacks)
}

/// Staged sink for the character store. Every record is staged; commit
/// rewrites the inventory table from the staged set.
pub struct CharacterSink<'a> {
    store: &'a SweepStore,
    staged: Vec<CharacterRecord>,
}

impl RecordSink<CharacterRecord> for CharacterSink<'_> {
    fn write(&mut self, record: &CharacterRecord) -> SweepResult<()> {
        self.staged.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self, dry_run: bool) -> SweepResult<()> {
        if dry_run {
            log::info!(
                "(dry run) discarding {} staged character records",
                self.staged.len()
            );
            self.staged.clear();
            return Ok(());
        }
        self.store.replace_inventories(&self.staged)?;
        self.staged.clear();
        Ok(())
    }
}

/// Staged sink for the storage store. Commit rewrites both storage tables
/// from the staged set, so an unstaged (wiped) record is deleted.
pub struct StorageSink<'a> {
    store: &'a SweepStore,
    staged: Vec<StorageRecord>,
}

impl RecordSink<StorageRecord> for StorageSink<'_> {
    fn write(&mut self, record: &StorageRecord) -> SweepResult<()> {
        self.staged.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self, dry_run: bool) -> SweepResult<()> {
        if dry_run {
            log::info!(
                "(dry run) discarding {} staged storage records",
                self.staged.len()
            );
            self.staged.clear();
            return Ok(());
        }
        self.store.replace_storages(&self.staged)?;
        self.staged.clear();
        Ok(())
    }
}
