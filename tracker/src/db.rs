//! SQLite measurement store

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

pub struct Database {
    conn: Connection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub id: i64,
    pub day: NaiveDate,
    pub value: f64,
}

impl Database {
    /// Creates the schema in a new data file. The caller makes sure `path` is not in use yet.
    pub fn create(path: &Path) -> rusqlite::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Self::open(path)?;
        db.init_schema()?;
        debug!("Created data file {:?}", path);
        Ok(db)
    }

    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let db = Self { conn: Connection::open_in_memory()? };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(include_str!("../schema.sql"))
    }

    pub fn insert(&self, day: NaiveDate, value: f64) -> rusqlite::Result<i64> {
        self.conn.execute(
            "INSERT INTO measurements (day, value) VALUES (?1, ?2)",
            params![day, value],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted measurement {} ({}, {})", id, day, value);
        Ok(id)
    }

    /// Updates the given fields of a measurement. Returns false if no row has that id.
    pub fn update(&self, id: i64, day: Option<NaiveDate>, value: Option<f64>) -> rusqlite::Result<bool> {
        let changed = self.conn.execute(
            "UPDATE measurements SET day = COALESCE(?1, day), value = COALESCE(?2, value) WHERE id = ?3",
            params![day, value, id],
        )?;
        Ok(changed > 0)
    }

    /// Deletes a measurement. Returns false if no row has that id.
    pub fn remove(&self, id: i64) -> rusqlite::Result<bool> {
        let changed = self.conn.execute("DELETE FROM measurements WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn contains(&self, id: i64) -> rusqlite::Result<bool> {
        let count: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM measurements WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn get(&self, id: i64) -> rusqlite::Result<Option<Measurement>> {
        self.conn
            .query_row(
                "SELECT id, day, value FROM measurements WHERE id = ?1",
                params![id],
                Self::map_measurement,
            )
            .optional()
    }

    /// All measurements, oldest day first. Measurements on the same day keep insertion order.
    pub fn list_ordered(&self) -> rusqlite::Result<Vec<Measurement>> {
        let mut stmt = self.conn.prepare("SELECT id, day, value FROM measurements ORDER BY day ASC, id ASC")?;
        let rows = stmt.query_map([], Self::map_measurement)?;
        rows.collect()
    }

    pub fn count(&self) -> rusqlite::Result<u64> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn map_measurement(row: &rusqlite::Row) -> rusqlite::Result<Measurement> {
        Ok(Measurement {
            id: row.get(0)?,
            day: row.get(1)?,
            value: row.get(2)?,
        })
    }
}
