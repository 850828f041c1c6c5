use crate::errors::CoreError;
use crate::models::profile::{FinancialProfile, ProfilePatch};
use crate::storage::kv::KeyValueStore;
use crate::storage::manager::StorageManager;

/// Handle returned by [`ProfileStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FinancialProfile)>;

/// In-memory profile state with an explicit save boundary.
///
/// Edits go through [`apply`](Self::apply) into a working copy. The working
/// copy is written to storage only by [`commit`](Self::commit); until then
/// [`discard`](Self::discard) rolls it back to the last committed snapshot.
pub struct ProfileStore {
    committed: FinancialProfile,
    working: FinancialProfile,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("working", &self.working)
            .field("listeners", &self.listeners.len())
            .field("dirty", &self.has_unsaved_changes())
            .finish()
    }
}

impl ProfileStore {
    /// Start from `profile`, treating it as already committed.
    pub fn new(profile: FinancialProfile) -> Self {
        Self {
            committed: profile.clone(),
            working: profile,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Load the profile stored under `key`.
    ///
    /// A missing entry gives the default profile. A malformed entry is logged
    /// and also gives the default; the stored blob is left in place until the
    /// next commit overwrites it. Only store I/O failures are returned.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Self, CoreError> {
        let profile = match store.get(key)? {
            None => FinancialProfile::default(),
            Some(json) => match StorageManager::load_from_str(&json) {
                Ok(profile) => profile,
                Err(e) => {
                    log::error!("Failed to parse saved profile under '{key}', using defaults: {e}");
                    FinancialProfile::default()
                }
            },
        };
        Ok(Self::new(profile))
    }

    /// The current (possibly uncommitted) profile.
    #[must_use]
    pub fn snapshot(&self) -> &FinancialProfile {
        &self.working
    }

    /// The profile as of the last commit or load.
    #[must_use]
    pub fn committed(&self) -> &FinancialProfile {
        &self.committed
    }

    /// Shallow-merge `patch` into the working profile and notify listeners.
    pub fn apply(&mut self, patch: ProfilePatch) -> &FinancialProfile {
        if !patch.is_empty() {
            log::debug!("Applying profile patch");
            patch.merge_into(&mut self.working);
            self.notify();
        }
        &self.working
    }

    /// Replace the working profile wholesale.
    pub fn replace(&mut self, profile: FinancialProfile) -> &FinancialProfile {
        self.working = profile;
        self.notify();
        &self.working
    }

    /// Write the working profile under `key` and make it the committed one.
    pub fn commit(&mut self, store: &mut dyn KeyValueStore, key: &str) -> Result<(), CoreError> {
        StorageManager::save(store, key, &self.working)?;
        self.committed = self.working.clone();
        log::info!("Profile committed under '{key}'");
        Ok(())
    }

    /// Drop uncommitted edits.
    pub fn discard(&mut self) {
        if self.has_unsaved_changes() {
            self.working = self.committed.clone();
            self.notify();
        }
    }

    /// Delete the stored profile and return to defaults.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore, key: &str) -> Result<(), CoreError> {
        store.remove(key)?;
        self.committed = FinancialProfile::default();
        self.working = self.committed.clone();
        log::info!("Profile under '{key}' reset to defaults");
        self.notify();
        Ok(())
    }

    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.working != self.committed
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Call `listener` with the new working profile after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&FinancialProfile) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.working);
        }
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new(FinancialProfile::default())
    }
}
