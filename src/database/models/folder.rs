use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: Uuid,
    pub folder_name: String,
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewFolder {
    pub folder_name: String,
}

/// Partial update body. Updatable fields are enumerated here so a request
/// can only touch what the resource declares mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderPatch {
    pub folder_name: Option<String>,
}

impl FolderPatch {
    /// True when the body carries at least one usable value. Empty strings
    /// do not count, matching the falsy check the update contract specifies.
    pub fn has_changes(&self) -> bool {
        self.folder_name.as_deref().is_some_and(|name| !name.is_empty())
    }
}
