use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub note_name: String,
    pub date_modified: DateTime<Utc>,
    pub folder_id: Uuid,
    pub note_content: String,
}

/// Insert payload; the store assigns id and date_modified.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub note_name: String,
    pub folder_id: Uuid,
    pub note_content: String,
}

/// Partial update body with the statically enumerated mutable fields.
/// `date_modified` is store-managed and not client-writable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotePatch {
    pub note_name: Option<String>,
    pub folder_id: Option<Uuid>,
    pub note_content: Option<String>,
}

impl NotePatch {
    /// True when the body carries at least one usable value; empty strings
    /// count as nothing-to-update, like absent fields.
    pub fn has_changes(&self) -> bool {
        self.note_name.as_deref().is_some_and(|name| !name.is_empty())
            || self.folder_id.is_some()
            || self.note_content.as_deref().is_some_and(|content| !content.is_empty())
    }
}
