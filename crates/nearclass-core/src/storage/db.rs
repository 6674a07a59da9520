//! SQLite store for normalized meetings and buildings.
//!
//! Imports replace a whole term at a time, so a ranking caller never
//! observes a partially-updated term.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;
use crate::model::{Building, Meeting};

/// Build a Meeting from a database row in column order.
fn row_to_meeting(row: &rusqlite::Row) -> Result<Meeting, rusqlite::Error> {
    Ok(Meeting {
        meeting_id: row.get(0)?,
        course_id: row.get(1)?,
        title: row.get(2)?,
        dept: row.get(3)?,
        days: row.get(4)?,
        start_min: row.get(5)?,
        end_min: row.get(6)?,
        building_code: row.get(7)?,
        room: row.get(8)?,
        term: row.get(9)?,
    })
}

/// SQLite database for meeting and building storage.
pub struct MeetingDb {
    conn: Connection,
}

impl MeetingDb {
    /// Open the store at `~/.config/nearclass/nearclass.db`, creating tables
    /// if needed.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("nearclass.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::QueryFailed)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS meetings (
                meeting_id     TEXT NOT NULL,
                course_id      TEXT NOT NULL,
                title          TEXT NOT NULL DEFAULT '',
                dept           TEXT NOT NULL DEFAULT '',
                days           TEXT NOT NULL,
                start_min      INTEGER NOT NULL,
                end_min        INTEGER NOT NULL,
                building_code  TEXT NOT NULL,
                room           TEXT NOT NULL DEFAULT '',
                term           TEXT NOT NULL,
                PRIMARY KEY (meeting_id, term)
            );
            CREATE INDEX IF NOT EXISTS idx_meetings_term ON meetings(term);
            CREATE TABLE IF NOT EXISTS buildings (
                code  TEXT PRIMARY KEY,
                name  TEXT NOT NULL DEFAULT '',
                lat   REAL NOT NULL,
                lon   REAL NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Replace all meetings for a term in one transaction.
    pub fn replace_term(&mut self, term: &str, meetings: &[Meeting]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM meetings WHERE term = ?1", params![term])?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO meetings
                 (meeting_id, course_id, title, dept, days, start_min, end_min,
                  building_code, room, term)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for m in meetings {
                stmt.execute(params![
                    m.meeting_id,
                    m.course_id,
                    m.title,
                    m.dept,
                    m.days,
                    m.start_min,
                    m.end_min,
                    m.building_code,
                    m.room,
                    m.term,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// All meetings stored for a term, in insertion order.
    pub fn meetings_for_term(&self, term: &str) -> Result<Vec<Meeting>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT meeting_id, course_id, title, dept, days, start_min, end_min,
                    building_code, room, term
             FROM meetings WHERE term = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![term], row_to_meeting)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Insert or update building coordinates.
    pub fn upsert_buildings(&mut self, buildings: &[Building]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO buildings (code, name, lat, lon) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(code) DO UPDATE SET name = ?2, lat = ?3, lon = ?4",
            )?;
            for b in buildings {
                stmt.execute(params![b.code, b.name, b.lat, b.lon])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// All known buildings, keyed by code.
    pub fn buildings(&self) -> Result<HashMap<String, Building>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT code, name, lat, lon FROM buildings")?;
        let rows = stmt.query_map([], |row| {
            Ok(Building {
                code: row.get(0)?,
                name: row.get(1)?,
                lat: row.get(2)?,
                lon: row.get(3)?,
            })
        })?;
        let mut out = HashMap::new();
        for row in rows {
            let building = row?;
            out.insert(building.code.clone(), building);
        }
        Ok(out)
    }
}
