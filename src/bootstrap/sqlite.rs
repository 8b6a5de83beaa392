use anyhow::{Context, Result};
use rusqlite::{Connection, Transaction};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use crate::schema::{TableSchema, ALL_TABLES, SEED_ORDER};
use crate::seed::{parse_record, SeedRow};

const BATCH_SIZE: usize = 1000;

/// Per-table row counts from a completed rebuild
#[derive(Debug, Default)]
pub struct RebuildReport {
    pub tables: Vec<(&'static str, u64)>,
}

impl RebuildReport {
    pub fn total(&self) -> u64 {
        self.tables.iter().map(|(_, n)| n).sum()
    }
}

struct SchemaBuilder {
    conn: Connection,
}

impl SchemaBuilder {
    fn new(db_path: &Path) -> Result<Self> {
        // Remove a stale staging file from an earlier failed run
        match std::fs::remove_file(db_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e).context("Failed to remove stale staging database"),
        }

        let conn = Connection::open(db_path).context("Failed to create database")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self { conn })
    }

    /// Create all tables and their FK indexes in dependency order
    fn create_tables(&self) -> Result<()> {
        for schema in ALL_TABLES {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Seed every table from its CSV file inside a single transaction
    fn seed_all(&mut self, data_dir: &Path) -> Result<RebuildReport> {
        let tx = self.conn.transaction()?;
        let mut report = RebuildReport::default();

        for schema in SEED_ORDER {
            let count = seed_table(&tx, schema, data_dir)?;
            report.tables.push((schema.name, count));
        }

        tx.commit()?;
        Ok(report)
    }

    fn finalize(self) -> Result<()> {
        self.conn.execute("PRAGMA optimize;", [])?;
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")?;
        Ok(())
    }
}

/// Import seed data from one CSV file
fn seed_table(tx: &Transaction, schema: &TableSchema, data_dir: &Path) -> Result<u64> {
    let file_path = data_dir.join(schema.source_file);
    let mut reader = csv::Reader::from_path(&file_path)
        .with_context(|| format!("Failed to open seed file: {:?}", file_path))?;
    let header = reader
        .headers()
        .with_context(|| format!("Failed to read header of {:?}", file_path))?
        .clone();

    let insert_sql = generate_insert(schema);
    let mut count: u64 = 0;
    let mut batch: Vec<SeedRow> = Vec::with_capacity(BATCH_SIZE);

    for record in reader.records() {
        let record =
            record.with_context(|| format!("Failed to read record in {}", schema.source_file))?;

        let row = parse_record(&header, &record, schema)
            .with_context(|| format!("Failed to parse record in {}", schema.source_file))?;

        batch.push(row);

        if batch.len() >= BATCH_SIZE {
            insert_batch(tx, &insert_sql, &batch)?;
            count += batch.len() as u64;
            batch.clear();
        }
    }

    // Insert remaining batch
    if !batch.is_empty() {
        insert_batch(tx, &insert_sql, &batch)?;
        count += batch.len() as u64;
    }

    Ok(count)
}

/// Insert a batch of rows into the database
fn insert_batch(tx: &Transaction, sql: &str, batch: &[SeedRow]) -> Result<()> {
    let mut stmt = tx.prepare_cached(sql)?;

    for row in batch {
        for (idx, value) in row.values.iter().enumerate() {
            value.bind_to(idx + 1, &mut stmt)?;
        }
        stmt.raw_execute()?;
    }

    Ok(())
}

/// Drop and rebuild the database from CSV seed files.
///
/// The new database is assembled in a staging file next to the target and
/// swapped over it only after seeding commits. A failed rebuild removes the
/// staging file and leaves any previous database untouched.
pub fn rebuild(db_path: &Path, data_dir: &Path) -> Result<RebuildReport> {
    let staging = staging_path(db_path);

    match build(&staging, data_dir) {
        Ok(report) => {
            match std::fs::remove_file(db_path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    let _ = std::fs::remove_file(&staging);
                    return Err(e).context("Failed to remove previous database");
                }
            }

            std::fs::rename(&staging, db_path)
                .context("Failed to move rebuilt database into place")?;
            Ok(report)
        }
        Err(e) => {
            let _ = std::fs::remove_file(&staging);
            Err(e)
        }
    }
}

fn build(staging: &Path, data_dir: &Path) -> Result<RebuildReport> {
    let mut builder = SchemaBuilder::new(staging)?;
    builder.create_tables()?;
    let report = builder.seed_all(data_dir)?;
    builder.finalize()?;
    Ok(report)
}

fn staging_path(db_path: &Path) -> PathBuf {
    let mut name = db_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".rebuild");
    db_path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_path_keeps_directory() {
        let staging = staging_path(Path::new("/tmp/guide/city.db"));
        assert_eq!(staging, Path::new("/tmp/guide/city.db.rebuild"));
    }
}
