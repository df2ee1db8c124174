use crate::error::{storage_error, AppResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::warn;

use super::MAX_RECENT_INVITEES;

/// Durability mirror for the recent-invitee list.
///
/// Reads recover to an empty list on any failure; writes report errors so
/// the caller can log them, but the in-memory list stays authoritative.
#[async_trait]
pub trait InviteeStore: Send + Sync {
    async fn load(&self) -> Vec<String>;
    async fn save(&self, invitees: &[String]) -> AppResult<()>;
}

/// Whole-file JSON store: a single array of normalized email strings
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl InviteeStore for JsonFileStore {
    async fn load(&self) -> Vec<String> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Unable to read recent invitees from {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&content) {
            Ok(list) => sanitize_list(list),
            Err(e) => {
                warn!("Recent invitees file {:?} is corrupt: {}", self.path, e);
                Vec::new()
            }
        }
    }

    async fn save(&self, invitees: &[String]) -> AppResult<()> {
        let normalized = sanitize_list(invitees.to_vec());

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| storage_error(&format!("Could not create {:?}: {}", dir, e)))?;
        }

        let json = serde_json::to_string_pretty(&normalized)?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| storage_error(&format!("Could not write {:?}: {}", self.path, e)))?;
        Ok(())
    }
}

/// Drop non-addresses the file may have accumulated and enforce the cap
fn sanitize_list(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .take(MAX_RECENT_INVITEES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_list() {
        let list = vec![
            " Alice@X.com ".to_string(),
            String::new(),
            "bob@y.com".to_string(),
        ];
        assert_eq!(sanitize_list(list), vec!["alice@x.com", "bob@y.com"]);
    }

    #[test]
    fn test_sanitize_list_caps_length() {
        let list: Vec<String> = (0..80).map(|i| format!("user{}@x.com", i)).collect();
        assert_eq!(sanitize_list(list).len(), MAX_RECENT_INVITEES);
    }
}
