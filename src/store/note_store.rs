//! SQLite-backed note storage

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::types::{NewNote, Note, NoteChanges};

/// Persistent note store over a single SQLite connection
pub struct NoteStore {
    conn: Mutex<Connection>,
}

impl NoteStore {
    /// Open or create the database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                title TEXT,
                body TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// Get all notes, no filter
    pub fn list(&self) -> Result<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, title, body, created_at, updated_at FROM notes")?;

        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<rusqlite::Result<Vec<Note>>>()?;

        Ok(notes)
    }

    /// Get a note by ID; absent is distinguished from error
    pub fn get(&self, id: uuid::Uuid) -> Result<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, title, body, created_at, updated_at FROM notes WHERE id = ?1")?;

        let mut rows = stmt.query_map(params![id.to_string()], row_to_note)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Create a new note, assigning its id and timestamps
    pub fn create(&self, fields: NewNote) -> Result<Note> {
        let note = Note::new(fields.title, fields.body);

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO notes (id, title, body, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                note.id.to_string(),
                note.title,
                note.body,
                note.created_at.to_rfc3339(),
                note.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(note)
    }

    /// Apply a partial update to a note. Fields left as `None` keep their
    /// stored value. Fails with `NoteNotFound` when the id is absent.
    pub fn update(&self, id: uuid::Uuid, changes: NoteChanges) -> Result<Note> {
        let updated_at = chrono::Utc::now();

        {
            let conn = self.conn.lock().unwrap();
            let affected = conn.execute(
                r#"
                UPDATE notes SET
                    title = COALESCE(?1, title),
                    body = COALESCE(?2, body),
                    updated_at = ?3
                WHERE id = ?4
                "#,
                params![
                    changes.title,
                    changes.body,
                    updated_at.to_rfc3339(),
                    id.to_string(),
                ],
            )?;

            if affected == 0 {
                return Err(Error::NoteNotFound(id.to_string()));
            }
        }

        self.get(id)?
            .ok_or_else(|| Error::NoteNotFound(id.to_string()))
    }

    /// Delete a note. Fails with `NoteNotFound` when the id is absent.
    pub fn delete(&self, id: uuid::Uuid) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id.to_string()])?;

        if affected == 0 {
            return Err(Error::NoteNotFound(id.to_string()));
        }

        Ok(())
    }
}

/// Map a database row to a `Note`
fn row_to_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Note {
        id: id
            .parse()
            .map_err(|e| conversion_error(0, Box::new(e)))?,
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: parse_timestamp(&created_at, 3)?,
        updated_at: parse_timestamp(&updated_at, 4)?,
    })
}

fn parse_timestamp(raw: &str, column: usize) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| conversion_error(column, Box::new(e)))
}

fn conversion_error(
    column: usize,
    err: Box<dyn std::error::Error + Send + Sync + 'static>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> NoteStore {
        NoteStore::open_in_memory().expect("Should open in-memory store")
    }

    #[test]
    fn test_create_and_list() {
        let store = store();

        let note = store
            .create(NewNote {
                title: Some("A".to_string()),
                body: Some("B".to_string()),
            })
            .expect("Should create note");

        assert!(!note.id.is_nil());

        let notes = store.list().expect("Should list notes");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title.as_deref(), Some("A"));
        assert_eq!(notes[0].body.as_deref(), Some("B"));
    }

    #[test]
    fn test_list_empty() {
        let store = store();
        let notes = store.list().expect("Should list notes");
        assert!(notes.is_empty());
    }

    #[test]
    fn test_get_absent_is_none() {
        let store = store();
        let found = store.get(uuid::Uuid::new_v4()).expect("Should query");
        assert!(found.is_none());
    }

    #[test]
    fn test_update_partial() {
        let store = store();
        let note = store
            .create(NewNote {
                title: Some("old title".to_string()),
                body: Some("old body".to_string()),
            })
            .unwrap();

        let updated = store
            .update(
                note.id,
                NoteChanges {
                    title: Some("X".to_string()),
                    body: None,
                },
            )
            .expect("Should update note");

        assert_eq!(updated.title.as_deref(), Some("X"));
        assert_eq!(updated.body.as_deref(), Some("old body"));
        assert!(updated.updated_at >= note.updated_at);
    }

    #[test]
    fn test_update_missing_id() {
        let store = store();
        let result = store.update(uuid::Uuid::new_v4(), NoteChanges::default());
        assert!(matches!(result, Err(Error::NoteNotFound(_))));
    }

    #[test]
    fn test_delete_then_get() {
        let store = store();
        let note = store.create(NewNote::default()).unwrap();

        store.delete(note.id).expect("Should delete note");
        assert!(store.get(note.id).unwrap().is_none());

        let again = store.delete(note.id);
        assert!(matches!(again, Err(Error::NoteNotFound(_))));
    }
}
