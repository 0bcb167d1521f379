use rusqlite::{Connection, OptionalExtension};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Event, EventError, Mood, MoodSet};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("Event not found: {0}")]
    EventNotFound(String),
    #[error("Event already exists: {0}")]
    DuplicateEvent(String),
    #[error("Invalid event: {0}")]
    InvalidEvent(#[from] EventError),
    #[error("Mood already exists: {0}")]
    DuplicateMood(String),
    #[error("Mood name cannot be empty")]
    InvalidMood,
    #[error("Import/export failed: {0}")]
    TransferError(String),
}

/// Minimal persistence contract the views depend on
pub trait EventStore {
    /// Every event, drafts included, newest-created first
    fn list(&self) -> Result<Vec<Event>, DatabaseError>;
    fn get(&self, id: &str) -> Result<Event, DatabaseError>;
    fn create(&self, event: &Event) -> Result<(), DatabaseError>;
    fn update(&self, event: &Event) -> Result<(), DatabaseError>;
    fn delete(&self, id: &str) -> Result<(), DatabaseError>;
}

const EVENT_COLUMNS: &str = "id, place, city, date, start_time, end_time, is_free, link, is_draft, \
                             mood, notes, image_url, created_at, updated_at";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let db = Database { conn };
        db.initialize_schema()?;
        log::info!("event=db_open path={} status=ok", db_path.display());

        Ok(db)
    }

    /// In-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let db = Database { conn: Connection::open_in_memory()? };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS events (
                id              TEXT PRIMARY KEY,
                place           TEXT NOT NULL DEFAULT '',
                city            TEXT NOT NULL DEFAULT '',
                date            TEXT NOT NULL DEFAULT '',
                start_time      TEXT,
                end_time        TEXT,
                is_free         INTEGER DEFAULT 0,
                link            TEXT,
                is_draft        INTEGER DEFAULT 0,
                mood            TEXT,
                notes           TEXT,
                image_url       TEXT,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS favorites (
                event_id        TEXT PRIMARY KEY,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS moods (
                name            TEXT PRIMARY KEY,
                description     TEXT,
                icon            TEXT,
                is_active       INTEGER DEFAULT 1,
                position        INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
            CREATE INDEX IF NOT EXISTS idx_events_is_draft ON events(is_draft);",
        )?;
        Ok(())
    }

    fn now() -> String {
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn row_to_event(row: &rusqlite::Row) -> Result<Event, rusqlite::Error> {
        let mood: Option<String> = row.get(9)?;
        Ok(Event {
            id: row.get(0)?,
            place: row.get(1)?,
            city: row.get(2)?,
            date: row.get(3)?,
            start_time: row.get(4)?,
            end_time: row.get(5)?,
            is_free: row.get::<_, i64>(6)? != 0,
            link: row.get(7)?,
            is_draft: row.get::<_, i64>(8)? != 0,
            moods: mood.map(|m| MoodSet::parse(&m)).unwrap_or_default(),
            notes: row.get(10)?,
            image_url: row.get(11)?,
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    fn query_events(&self, where_clause: &str) -> Result<Vec<Event>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM events {} ORDER BY created_at DESC, rowid DESC",
            EVENT_COLUMNS, where_clause
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let events = stmt
            .query_map([], Self::row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    fn mood_column(moods: &MoodSet) -> Option<String> {
        if moods.is_empty() {
            None
        } else {
            Some(moods.to_joined())
        }
    }

    fn exists(&self, id: &str) -> Result<bool, DatabaseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM events WHERE id = ?1",
            rusqlite::params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn insert_row(conn: &Connection, event: &Event) -> Result<(), DatabaseError> {
        conn.execute(
            &format!(
                "INSERT INTO events ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                EVENT_COLUMNS
            ),
            rusqlite::params![
                event.id,
                event.place,
                event.city,
                event.date,
                event.start_time,
                event.end_time,
                if event.is_free { 1 } else { 0 },
                event.link,
                if event.is_draft { 1 } else { 0 },
                Self::mood_column(&event.moods),
                event.notes,
                event.image_url,
                event.created_at,
                event.updated_at
            ],
        )?;
        Ok(())
    }

    /// Returns the number of rows changed (0 when the id is unknown)
    fn update_row(conn: &Connection, event: &Event) -> Result<usize, DatabaseError> {
        let changed = conn.execute(
            "UPDATE events SET place = ?1, city = ?2, date = ?3, start_time = ?4, end_time = ?5,
             is_free = ?6, link = ?7, is_draft = ?8, mood = ?9, notes = ?10, image_url = ?11,
             updated_at = ?12 WHERE id = ?13",
            rusqlite::params![
                event.place,
                event.city,
                event.date,
                event.start_time,
                event.end_time,
                if event.is_free { 1 } else { 0 },
                event.link,
                if event.is_draft { 1 } else { 0 },
                Self::mood_column(&event.moods),
                event.notes,
                event.image_url,
                event.updated_at,
                event.id
            ],
        )?;
        Ok(changed)
    }

    /// Published events, newest-created first
    pub fn list_events(&self) -> Result<Vec<Event>, DatabaseError> {
        self.query_events("WHERE is_draft = 0")
    }

    /// Drafts, newest-created first
    pub fn list_drafts(&self) -> Result<Vec<Event>, DatabaseError> {
        self.query_events("WHERE is_draft = 1")
    }

    /// Validate a draft and turn it into a published event
    pub fn publish_draft(&self, id: &str) -> Result<Event, DatabaseError> {
        let mut event = self.get(id)?;
        event.is_draft = false;
        event.validate()?;
        event.touch();
        self.update(&event)?;
        log::info!("event=draft_publish id={} status=ok", id);
        Ok(event)
    }

    /// Insert or replace by id, keeping validation rules
    pub fn upsert(&self, event: &Event) -> Result<(), DatabaseError> {
        if self.exists(&event.id)? {
            self.update(event)
        } else {
            self.create(event)
        }
    }

    /// Toggle the favorite flag of an event; returns the new state
    pub fn toggle_favorite(&self, event_id: &str) -> Result<bool, DatabaseError> {
        if !self.exists(event_id)? {
            return Err(DatabaseError::EventNotFound(event_id.to_string()));
        }
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute(
            "DELETE FROM favorites WHERE event_id = ?1",
            rusqlite::params![event_id],
        )?;
        let favorited = removed == 0;
        if favorited {
            tx.execute(
                "INSERT INTO favorites (event_id, created_at) VALUES (?1, ?2)",
                rusqlite::params![event_id, Self::now()],
            )?;
        }
        tx.commit()?;
        log::debug!("event=favorite_toggle id={} favorited={}", event_id, favorited);
        Ok(favorited)
    }

    pub fn favorite_ids(&self) -> Result<HashSet<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT event_id FROM favorites")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(ids)
    }

    /// Favorited published events, newest-created first
    pub fn list_favorite_events(&self) -> Result<Vec<Event>, DatabaseError> {
        self.query_events("WHERE is_draft = 0 AND id IN (SELECT event_id FROM favorites)")
    }

    /// Mood taxonomy in insertion order
    pub fn list_moods(&self) -> Result<Vec<Mood>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, description, icon, is_active FROM moods ORDER BY position ASC",
        )?;
        let moods = stmt
            .query_map([], |row| {
                Ok(Mood {
                    name: row.get(0)?,
                    description: row.get(1)?,
                    icon: row.get(2)?,
                    is_active: row.get::<_, i64>(3)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(moods)
    }

    pub fn add_mood(&self, mood: &Mood) -> Result<(), DatabaseError> {
        let name = mood.name.trim();
        if name.is_empty() {
            return Err(DatabaseError::InvalidMood);
        }
        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM moods WHERE name = ?1",
                rusqlite::params![name],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(DatabaseError::DuplicateMood(name.to_string()));
        }
        self.conn.execute(
            "INSERT INTO moods (name, description, icon, is_active, position)
             VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(position), -1) + 1 FROM moods))",
            rusqlite::params![
                name,
                mood.description,
                mood.icon,
                if mood.is_active { 1 } else { 0 }
            ],
        )?;
        log::info!("event=mood_add name={} status=ok", name);
        Ok(())
    }

    /// Remove a mood from the taxonomy; returns false when it did not exist.
    /// Events keep their tags.
    pub fn delete_mood(&self, name: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .conn
            .execute("DELETE FROM moods WHERE name = ?1", rusqlite::params![name.trim()])?;
        Ok(removed > 0)
    }

    /// Seed the taxonomy with `defaults` when it is empty; returns how many
    /// moods were inserted
    pub fn seed_moods_if_empty(&self, defaults: &[String]) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM moods", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }
        let mut inserted = 0;
        for name in defaults {
            match self.add_mood(&Mood::new(name.clone())) {
                Ok(()) => inserted += 1,
                Err(DatabaseError::DuplicateMood(_)) | Err(DatabaseError::InvalidMood) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(inserted)
    }

    /// Write every event (drafts included) as a JSON array
    pub fn export_json(&self, path: &Path) -> Result<usize, DatabaseError> {
        let events = self.list()?;
        let json = serde_json::to_string_pretty(&events)
            .map_err(|e| DatabaseError::TransferError(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| DatabaseError::TransferError(e.to_string()))?;
        log::info!("event=export path={} count={}", path.display(), events.len());
        Ok(events.len())
    }

    /// Read a JSON array of events and upsert each by id in one transaction
    pub fn import_json(&self, path: &Path) -> Result<usize, DatabaseError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DatabaseError::TransferError(e.to_string()))?;
        let events: Vec<Event> = serde_json::from_str(&contents)
            .map_err(|e| DatabaseError::TransferError(e.to_string()))?;

        // all or nothing: a bad element leaves the store untouched
        let now = Self::now();
        let tx = self.conn.unchecked_transaction()?;
        for mut event in events.iter().cloned() {
            if event.created_at.is_empty() {
                event.created_at = now.clone();
            }
            if event.updated_at.is_empty() {
                event.updated_at = now.clone();
            }
            event.validate()?;
            if Self::update_row(&tx, &event)? == 0 {
                Self::insert_row(&tx, &event)?;
            }
        }
        tx.commit()?;
        log::info!("event=import path={} count={}", path.display(), events.len());
        Ok(events.len())
    }
}

impl EventStore for Database {
    fn list(&self) -> Result<Vec<Event>, DatabaseError> {
        self.query_events("")
    }

    fn get(&self, id: &str) -> Result<Event, DatabaseError> {
        let sql = format!("SELECT {} FROM events WHERE id = ?1", EVENT_COLUMNS);
        self.conn
            .query_row(&sql, rusqlite::params![id], Self::row_to_event)
            .optional()?
            .ok_or_else(|| DatabaseError::EventNotFound(id.to_string()))
    }

    fn create(&self, event: &Event) -> Result<(), DatabaseError> {
        event.validate()?;
        if self.exists(&event.id)? {
            return Err(DatabaseError::DuplicateEvent(event.id.clone()));
        }
        Self::insert_row(&self.conn, event)?;
        log::info!("event=event_create id={} draft={} status=ok", event.id, event.is_draft);
        Ok(())
    }

    fn update(&self, event: &Event) -> Result<(), DatabaseError> {
        event.validate()?;
        if Self::update_row(&self.conn, event)? == 0 {
            return Err(DatabaseError::EventNotFound(event.id.clone()));
        }
        log::info!("event=event_update id={} status=ok", event.id);
        Ok(())
    }

    /// Delete an event and its favorite entry
    fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM events WHERE id = ?1", rusqlite::params![id])?;
        if removed == 0 {
            return Err(DatabaseError::EventNotFound(id.to_string()));
        }
        tx.execute("DELETE FROM favorites WHERE event_id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        log::info!("event=event_delete id={} status=ok", id);
        Ok(())
    }
}
