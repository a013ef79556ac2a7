//! Entity treasury permissions, read from a flat JSON document.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The universal override: a user holding this may perform any action on
/// a matched entity.
pub const ADMIN_PERMISSION: &str = "admin";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityRecord {
    #[serde(default)]
    pub entity_name: String,
    #[serde(default)]
    pub user_permissions: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct PermStore {
    path: PathBuf,
}

impl PermStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load(&self) -> HashMap<String, EntityRecord> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    /// Whether `discord_id` may perform `permission` on `entity`.
    ///
    /// A record matches when its key contains the entity name as a
    /// substring OR its `entity_name` field equals it; the loose substring
    /// match is long-standing observable behavior and can match several
    /// records. The user is authorized when any matched record lists the
    /// permission literally, or lists [`ADMIN_PERMISSION`]. No match, or
    /// no entry for the user, is simply "not authorized".
    pub async fn user_has_entity_perm(
        &self,
        discord_id: &str,
        entity: &str,
        permission: &str,
    ) -> bool {
        let records = self.load().await;
        for (key, record) in &records {
            if key.contains(entity) || record.entity_name == entity {
                if let Some(granted) = record.user_permissions.get(discord_id) {
                    if granted
                        .iter()
                        .any(|p| p == permission || p == ADMIN_PERMISSION)
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}
