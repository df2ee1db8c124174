use async_trait::async_trait;
use quickevent::components::recents::{InviteeStore, RecentInvitees, MAX_RECENT_INVITEES};
use quickevent::error::{storage_error, AppResult};
use std::sync::{Arc, Mutex};

/// Mock implementation of the invitee store for testing without a real file
#[derive(Default)]
struct MockInviteeStore {
    initial: Vec<String>,
    saved: Mutex<Vec<Vec<String>>>,
    fail_saves: bool,
}

impl MockInviteeStore {
    fn with_entries(entries: &[&str]) -> Self {
        Self {
            initial: entries.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    fn last_saved(&self) -> Option<Vec<String>> {
        self.saved.lock().unwrap().last().cloned()
    }

    fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl InviteeStore for MockInviteeStore {
    async fn load(&self) -> Vec<String> {
        self.initial.clone()
    }

    async fn save(&self, invitees: &[String]) -> AppResult<()> {
        if self.fail_saves {
            return Err(storage_error("disk full"));
        }
        self.saved.lock().unwrap().push(invitees.to_vec());
        Ok(())
    }
}

#[tokio::test]
async fn test_add_many_normalizes_and_prepends() {
    let store = Arc::new(MockInviteeStore::with_entries(&["bob@y.com"]));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.add_many(&[" Alice@X.com ".to_string()]).await;

    assert_eq!(recents.entries(), &["alice@x.com", "bob@y.com"]);
    assert_eq!(
        store.last_saved().unwrap(),
        vec!["alice@x.com", "bob@y.com"]
    );
}

#[tokio::test]
async fn test_add_many_with_nothing_usable_changes_nothing() {
    let store = Arc::new(MockInviteeStore::with_entries(&["bob@y.com"]));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.add_many(&[]).await;
    recents.add_many(&["   ".to_string(), String::new()]).await;

    assert_eq!(recents.entries(), &["bob@y.com"]);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_add_many_moves_existing_entry_to_front() {
    let store = Arc::new(MockInviteeStore::with_entries(&[
        "alice@x.com",
        "bob@y.com",
        "carol@z.com",
    ]));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.add_many(&["bob@y.com".to_string()]).await;

    assert_eq!(recents.entries(), &["bob@y.com", "alice@x.com", "carol@z.com"]);
}

#[tokio::test]
async fn test_add_many_enforces_cap_and_uniqueness() {
    // Distinct addresses so the starting list is actually full
    let entries: Vec<String> = (0..MAX_RECENT_INVITEES)
        .map(|i| format!("user{}@x.com", i))
        .collect();
    let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
    let store = Arc::new(MockInviteeStore::with_entries(&refs));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents
        .add_many(&["new@x.com".to_string(), "NEW@x.com".to_string()])
        .await;

    assert_eq!(recents.entries().len(), MAX_RECENT_INVITEES);
    assert_eq!(recents.entries()[0], "new@x.com");
    // The oldest entry fell off the end
    assert!(!recents
        .entries()
        .contains(&format!("user{}@x.com", MAX_RECENT_INVITEES - 1)));
    // No duplicates survived the double add
    let mut sorted = recents.entries().to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), MAX_RECENT_INVITEES);
}

#[tokio::test]
async fn test_rename_merges_with_existing_entry() {
    let store = Arc::new(MockInviteeStore::with_entries(&["alice@x.com", "bob@y.com"]));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.rename("alice@x.com", "Bob@Y.com").await;

    assert_eq!(recents.entries(), &["bob@y.com"]);
    assert_eq!(store.last_saved().unwrap(), vec!["bob@y.com"]);
}

#[tokio::test]
async fn test_rename_noop_cases() {
    let store = Arc::new(MockInviteeStore::with_entries(&["alice@x.com"]));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.rename("alice@x.com", "   ").await;
    recents.rename("alice@x.com", "alice@x.com").await;

    assert_eq!(recents.entries(), &["alice@x.com"]);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let store = Arc::new(MockInviteeStore::with_entries(&["alice@x.com", "bob@y.com"]));
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.remove("alice@x.com").await;
    let after_first = recents.entries().to_vec();
    recents.remove("alice@x.com").await;

    assert_eq!(recents.entries(), after_first.as_slice());
    assert_eq!(recents.entries(), &["bob@y.com"]);
}

#[tokio::test]
async fn test_failed_save_keeps_memory_authoritative() {
    let store = Arc::new(MockInviteeStore {
        initial: vec!["bob@y.com".to_string()],
        fail_saves: true,
        ..Default::default()
    });
    let mut recents = RecentInvitees::load(store.clone()).await;

    recents.add_many(&["alice@x.com".to_string()]).await;

    // The write failed, but the session list carries on
    assert_eq!(recents.entries(), &["alice@x.com", "bob@y.com"]);
}

#[tokio::test]
async fn test_matching_filters_case_insensitively() {
    let store = Arc::new(MockInviteeStore::with_entries(&["alice@x.com", "bob@y.com"]));
    let recents = RecentInvitees::load(store).await;

    assert_eq!(recents.matching("ALI"), vec!["alice@x.com"]);
    assert_eq!(recents.matching("@"), vec!["alice@x.com", "bob@y.com"]);
    assert!(recents.matching("zz").is_empty());
}
