//! SQLite-backed workout store.
//!
//! Holds the persisted workout catalogue the carousel browses. The handle is
//! an explicitly owned value -- callers open it at startup, pass it where it
//! is needed, and drop it at shutdown. The stage list is stored as a JSON
//! column, matching the shape the original records used.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::DatabaseError;
use crate::workout::{Stage, Workout};

/// SQLite database of workout definitions.
pub struct WorkoutDb {
    conn: Connection,
}

impl WorkoutDb {
    /// Open the database at `~/.config/gust/workouts.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or the database cannot be
    /// opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("workouts.db");
        Ok(Self::open_at(path)?)
    }

    /// Open the database at an explicit path (tests use a temp dir).
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS workouts (
                    id     INTEGER PRIMARY KEY AUTOINCREMENT,
                    title  TEXT NOT NULL,
                    color  INTEGER NOT NULL,
                    stages TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// All workouts, ordered by id (insertion order = carousel order).
    pub fn list(&self) -> Result<Vec<Workout>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, color, stages FROM workouts ORDER BY id ASC")?;
        let rows = stmt.query_map([], row_to_parts)?;
        let mut workouts = Vec::new();
        for row in rows {
            workouts.push(parts_to_workout(row?)?);
        }
        Ok(workouts)
    }

    /// Look up one workout. A miss is `None`, not an error.
    pub fn get(&self, id: i64) -> Result<Option<Workout>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, color, stages FROM workouts WHERE id = ?1")?;
        let parts = stmt.query_row(params![id], row_to_parts).optional()?;
        parts.map(parts_to_workout).transpose()
    }

    /// Insert a workout, returning it with its assigned id.
    pub fn insert(&self, workout: &Workout) -> Result<Workout, DatabaseError> {
        let stages = serde_json::to_string(&workout.stages)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO workouts (title, color, stages) VALUES (?1, ?2, ?3)",
            params![workout.title, workout.color, stages],
        )?;
        let mut stored = workout.clone();
        stored.id = self.conn.last_insert_rowid();
        Ok(stored)
    }

    /// Delete a workout by id. Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let n = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// Seed the built-in preset catalogue if the store is empty.
    ///
    /// Returns the number of presets inserted (0 when the store already has
    /// workouts, so re-opening never duplicates).
    pub fn seed_presets(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }
        let presets = Workout::presets();
        for preset in &presets {
            self.insert(preset)?;
        }
        Ok(presets.len())
    }
}

type RowParts = (i64, String, u32, String);

fn row_to_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<RowParts> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parts_to_workout((id, title, color, stages): RowParts) -> Result<Workout, DatabaseError> {
    let stages: Vec<Stage> =
        serde_json::from_str(&stages).map_err(|e| DatabaseError::CorruptRecord {
            id,
            message: e.to_string(),
        })?;
    Ok(Workout {
        id,
        title,
        color,
        stages,
    })
}
