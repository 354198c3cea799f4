use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::{NewNote, Note, NotePatch};
use crate::database::repository::Repository;
use crate::database::DatabaseError;

const TABLE: &str = "noteful_notes";

#[derive(Clone)]
pub struct NoteStore {
    repo: Repository<Note>,
    pool: PgPool,
}

impl NoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(TABLE, pool.clone()),
            pool,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<Note>, DatabaseError> {
        self.repo.select_all().await
    }

    pub async fn select_by_id(&self, id: Uuid) -> Result<Option<Note>, DatabaseError> {
        self.repo.select_by_id(id).await
    }

    /// Insert and return the stored row; id and date_modified are assigned
    /// by the database. Referential integrity of folder_id is the schema's
    /// concern, not checked here.
    pub async fn insert(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let inserted = sqlx::query_as::<_, Note>(
            "INSERT INTO noteful_notes (note_name, folder_id, note_content)
             VALUES ($1, $2, $3)
             RETURNING id, note_name, date_modified, folder_id, note_content",
        )
        .bind(&note.note_name)
        .bind(note.folder_id)
        .bind(&note.note_content)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Apply only the supplied patch fields. Every successful update also
    /// refreshes date_modified in the same statement. Callers gate on
    /// `NotePatch::has_changes` first.
    pub async fn update_by_id(&self, id: Uuid, changes: &NotePatch) -> Result<u64, DatabaseError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE noteful_notes SET ");
        let mut fields = query.separated(", ");
        if let Some(note_name) = changes.note_name.as_deref() {
            fields.push("note_name = ").push_bind_unseparated(note_name);
        }
        if let Some(folder_id) = changes.folder_id {
            fields.push("folder_id = ").push_bind_unseparated(folder_id);
        }
        if let Some(note_content) = changes.note_content.as_deref() {
            fields.push("note_content = ").push_bind_unseparated(note_content);
        }
        fields.push("date_modified = now()");
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError> {
        self.repo.delete_by_id(id).await
    }
}
