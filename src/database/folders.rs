use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::models::{Folder, FolderPatch, NewFolder};
use crate::database::repository::Repository;
use crate::database::DatabaseError;

const TABLE: &str = "noteful_folders";

#[derive(Clone)]
pub struct FolderStore {
    repo: Repository<Folder>,
    pool: PgPool,
}

impl FolderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new(TABLE, pool.clone()),
            pool,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<Folder>, DatabaseError> {
        self.repo.select_all().await
    }

    pub async fn select_by_id(&self, id: Uuid) -> Result<Option<Folder>, DatabaseError> {
        self.repo.select_by_id(id).await
    }

    /// Insert and return the stored row, id assigned by the database.
    pub async fn insert(&self, folder: NewFolder) -> Result<Folder, DatabaseError> {
        let inserted = sqlx::query_as::<_, Folder>(
            "INSERT INTO noteful_folders (folder_name)
             VALUES ($1)
             RETURNING id, folder_name",
        )
        .bind(&folder.folder_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Apply only the supplied patch fields. Callers must not pass an empty
    /// patch; they gate on `FolderPatch::has_changes` first.
    pub async fn update_by_id(
        &self,
        id: Uuid,
        changes: &FolderPatch,
    ) -> Result<u64, DatabaseError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE noteful_folders SET ");
        let mut fields = query.separated(", ");
        if let Some(folder_name) = changes.folder_name.as_deref() {
            fields.push("folder_name = ").push_bind_unseparated(folder_name);
        }
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DatabaseError> {
        self.repo.delete_by_id(id).await
    }
}
