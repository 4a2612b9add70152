//! In-memory drafts held by the host between requests.
//!
//! Each draft belongs to the session that opened it. Drafts idle for longer
//! than the store's time-to-live are dropped, and once the store is full the
//! least recently used draft makes room for a new one.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::domain::types::TourId;
use crate::editor::ItineraryEditor;
use crate::session::SessionContext;

/// Idle time after which an abandoned draft is dropped.
pub const DEFAULT_DRAFT_TTL: Duration = Duration::from_secs(2 * 60 * 60);
/// Drafts kept across all sessions.
pub const DEFAULT_MAX_DRAFTS: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct DraftKey {
    owner: Option<String>,
    id: TourId,
}

impl DraftKey {
    fn new(owner: &SessionContext, id: &TourId) -> Self {
        Self {
            owner: owner.token().map(str::to_string),
            id: id.clone(),
        }
    }
}

struct Entry {
    editor: ItineraryEditor,
    last_used: Instant,
    touched: u64,
}

#[derive(Default)]
struct Drafts {
    entries: HashMap<DraftKey, Entry>,
    clock: u64,
}

impl Drafts {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn purge_expired(&mut self, ttl: Duration) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.last_used.elapsed() < ttl);
        let expired = before - self.entries.len();
        if expired > 0 {
            log::info!("Dropped {expired} idle drafts");
        }
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.touched)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            log::warn!("Draft store is full, dropping draft {}", key.id);
            self.entries.remove(&key);
        }
    }
}

pub struct DraftStore {
    drafts: Mutex<Drafts>,
    ttl: Duration,
    capacity: usize,
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("ttl", &self.ttl)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_DRAFT_TTL, DEFAULT_MAX_DRAFTS)
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that drops drafts idle for `ttl` and holds at most `capacity`.
    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            drafts: Mutex::new(Drafts::default()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Drafts> {
        // Editors are only mutated through methods that validate before
        // writing, so a poisoned map is still consistent.
        self.drafts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn live(&self) -> MutexGuard<'_, Drafts> {
        let mut drafts = self.lock();
        drafts.purge_expired(self.ttl);
        drafts
    }

    /// Stores the editor for `owner`, replacing an abandoned draft with the same id.
    pub fn insert(&self, owner: &SessionContext, editor: ItineraryEditor) -> TourId {
        let id = editor.draft_id().clone();
        let key = DraftKey::new(owner, &id);

        let mut drafts = self.live();
        if !drafts.entries.contains_key(&key) {
            while drafts.entries.len() >= self.capacity {
                drafts.evict_least_recent();
            }
        }
        let touched = drafts.tick();
        drafts.entries.insert(
            key,
            Entry {
                editor,
                last_used: Instant::now(),
                touched,
            },
        );
        id
    }

    /// Runs `f` against the owner's draft while holding the lock. `None` when unknown.
    pub fn with_draft<T>(
        &self,
        owner: &SessionContext,
        id: &TourId,
        f: impl FnOnce(&mut ItineraryEditor) -> T,
    ) -> Option<T> {
        let mut drafts = self.live();
        let touched = drafts.tick();
        let entry = drafts.entries.get_mut(&DraftKey::new(owner, id))?;
        entry.last_used = Instant::now();
        entry.touched = touched;
        Some(f(&mut entry.editor))
    }

    pub fn remove(&self, owner: &SessionContext, id: &TourId) -> Option<ItineraryEditor> {
        self.live()
            .entries
            .remove(&DraftKey::new(owner, id))
            .map(|entry| entry.editor)
    }

    pub fn len(&self) -> usize {
        self.live().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
