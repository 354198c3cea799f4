use sqlx::PgPool;

use crate::database::{FolderStore, NoteStore};

pub mod folders;
pub mod notes;

/// Shared handler state. Stores are passed in explicitly per request via
/// axum state rather than read from a process-global handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub folders: FolderStore,
    pub notes: NoteStore,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            folders: FolderStore::new(pool.clone()),
            notes: NoteStore::new(pool.clone()),
            pool,
        }
    }
}
