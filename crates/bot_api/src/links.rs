//! Discord-user → backend-username link file.
//!
//! A flat JSON object written by the account-linking flow (out of scope
//! here); this side only reads it. A missing or unparsable file is an
//! empty mapping, never an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LinkStore {
    path: PathBuf,
}

impl LinkStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub async fn load(&self) -> HashMap<String, String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    /// Backend username linked to a Discord user id, if any.
    pub async fn username_for(&self, discord_id: &str) -> Option<String> {
        self.load().await.get(discord_id).cloned()
    }

    /// Reverse lookup, used to notify a recipient by Discord DM.
    pub async fn discord_id_for(&self, username: &str) -> Option<String> {
        self.load()
            .await
            .into_iter()
            .find_map(|(id, name)| (name == username).then_some(id))
    }
}
