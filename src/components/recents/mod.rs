mod store;

pub use store::{InviteeStore, JsonFileStore};

use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on the persisted recent-invitee list
pub const MAX_RECENT_INVITEES: usize = 50;

/// Ordered, deduplicated, size-bounded list of previously used invitees.
///
/// Most recently used first. The in-memory list is the source of truth for
/// the session; every mutation is mirrored to the store, and a failed save
/// is logged rather than raised.
pub struct RecentInvitees {
    entries: Vec<String>,
    store: Arc<dyn InviteeStore>,
}

impl RecentInvitees {
    /// Load the list from the store once at session start
    pub async fn load(store: Arc<dyn InviteeStore>) -> Self {
        let entries = store.load().await;
        debug!("Loaded {} recent invitees", entries.len());
        Self { entries, store }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries containing the given term, case-insensitively
    pub fn matching(&self, term: &str) -> Vec<&str> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.contains(&term))
            .map(String::as_str)
            .collect()
    }

    /// Move the given invitees to the front of the list.
    ///
    /// Inputs are normalized and deduplicated; an input that normalizes to
    /// nothing leaves the list untouched. Existing entries not re-added keep
    /// their relative order behind the new ones, and the list is truncated
    /// to `MAX_RECENT_INVITEES`.
    pub async fn add_many(&mut self, invitees: &[String]) {
        let mut normalized: Vec<String> = Vec::new();
        for invitee in invitees {
            let value = invitee.trim().to_lowercase();
            if !value.is_empty() && !normalized.contains(&value) {
                normalized.push(value);
            }
        }

        if normalized.is_empty() {
            return;
        }

        let mut next = normalized.clone();
        next.extend(
            self.entries
                .iter()
                .filter(|entry| !normalized.contains(entry))
                .cloned(),
        );
        next.truncate(MAX_RECENT_INVITEES);

        self.entries = next;
        self.persist().await;
    }

    /// Replace every occurrence of `old` with the normalized `new` value.
    ///
    /// The one mutation that can shrink the list: renaming onto an existing
    /// entry merges with it (first occurrence wins).
    pub async fn rename(&mut self, old: &str, new: &str) {
        let normalized = new.trim().to_lowercase();
        if normalized.is_empty() || normalized == old {
            return;
        }

        let mut next: Vec<String> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let value = if entry == old {
                normalized.clone()
            } else {
                entry.clone()
            };
            if !next.contains(&value) {
                next.push(value);
            }
        }

        self.entries = next;
        self.persist().await;
    }

    /// Remove every entry equal to `target`
    pub async fn remove(&mut self, target: &str) {
        self.entries.retain(|entry| entry != target);
        self.persist().await;
    }

    /// Mirror the current list to the store; failures are logged only
    async fn persist(&self) {
        if let Err(e) = self.store.save(&self.entries).await {
            warn!("Unable to store recent invitees: {}", e);
        }
    }
}
