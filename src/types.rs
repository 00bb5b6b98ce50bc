//! Core types for Notula

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A note: the single domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// System-assigned identifier, immutable after creation
    pub id: Uuid,
    /// Title text (optional)
    pub title: Option<String>,
    /// Body text (optional)
    pub body: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: Option<String>, body: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields accepted when creating a note. Unknown fields in the incoming
/// JSON are ignored; only title and body are ever persisted.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewNote {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Partial update to a note. A field left as `None` is untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Field names permitted in a PATCH body
pub const ALLOWED_UPDATE_FIELDS: [&str; 2] = ["title", "body"];
