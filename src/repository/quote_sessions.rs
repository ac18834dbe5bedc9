//! In-process store of quote wizards keyed by the visitor's quote key.
//!
//! Wizards never reach the collection store; the cookie session only carries
//! the key. Idle wizards expire, and the oldest one is evicted once the store
//! is full.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::domain::quote::QuoteWizard;
use crate::domain::types::SessionId;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Idle time after which an unfinished wizard is dropped.
pub const QUOTE_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);
/// Maximum number of wizards kept at once.
pub const QUOTE_CAPACITY: usize = 10_000;

struct Entry {
    wizard: QuoteWizard,
    touched_at: Instant,
    sequence: u64,
}

#[derive(Default)]
struct State {
    entries: HashMap<SessionId, Entry>,
    sequence: u64,
}

pub struct QuoteSessionStore {
    state: Mutex<State>,
    idle_ttl: Duration,
    capacity: usize,
}

impl Default for QuoteSessionStore {
    fn default() -> Self {
        Self::new(QUOTE_IDLE_TTL, QUOTE_CAPACITY)
    }
}

impl QuoteSessionStore {
    pub fn new(idle_ttl: Duration, capacity: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            idle_ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::Unexpected(format!("quote store lock poisoned: {e}")))
    }

    /// Wizard stored under `key`, if present and not expired.
    pub fn get(&self, key: SessionId) -> RepositoryResult<Option<QuoteWizard>> {
        let state = self.lock()?;
        Ok(state
            .entries
            .get(&key)
            .filter(|entry| entry.touched_at.elapsed() < self.idle_ttl)
            .map(|entry| entry.wizard.clone()))
    }

    /// Wizard stored under `key`, or a fresh one.
    pub fn load(&self, key: SessionId) -> RepositoryResult<QuoteWizard> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    pub fn save(&self, key: SessionId, wizard: QuoteWizard) -> RepositoryResult<()> {
        let mut state = self.lock()?;

        let idle_ttl = self.idle_ttl;
        let before = state.entries.len();
        state
            .entries
            .retain(|_, entry| entry.touched_at.elapsed() < idle_ttl);
        let expired = before - state.entries.len();
        if expired > 0 {
            log::debug!("Dropped {expired} idle quote wizards");
        }

        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.sequence)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                state.entries.remove(&oldest);
                log::warn!("Quote store full, evicted wizard {oldest}");
            }
        }

        state.sequence += 1;
        let sequence = state.sequence;
        state.entries.insert(
            key,
            Entry {
                wizard,
                touched_at: Instant::now(),
                sequence,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> RepositoryResult<usize> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> RepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_a_fresh_wizard() {
        let store = QuoteSessionStore::default();
        assert_eq!(store.load(SessionId::new()).unwrap(), QuoteWizard::new());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn saved_wizard_is_returned() {
        let store = QuoteSessionStore::default();
        let key = SessionId::new();
        let mut wizard = QuoteWizard::new();
        wizard.form.area = "12".to_string();
        store.save(key, wizard.clone()).unwrap();

        assert_eq!(store.load(key).unwrap(), wizard);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn idle_wizards_expire() {
        let store = QuoteSessionStore::new(Duration::ZERO, 10);
        let first = SessionId::new();
        let mut wizard = QuoteWizard::new();
        wizard.form.area = "5".to_string();
        store.save(first, wizard).unwrap();

        assert_eq!(store.get(first).unwrap(), None);
        store.save(SessionId::new(), QuoteWizard::new()).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn full_store_evicts_the_least_recently_saved() {
        let store = QuoteSessionStore::new(QUOTE_IDLE_TTL, 2);
        let (a, b, c) = (SessionId::new(), SessionId::new(), SessionId::new());
        store.save(a, QuoteWizard::new()).unwrap();
        store.save(b, QuoteWizard::new()).unwrap();
        store.save(a, QuoteWizard::new()).unwrap();
        store.save(c, QuoteWizard::new()).unwrap();

        assert_eq!(store.len().unwrap(), 2);
        assert!(store.get(a).unwrap().is_some());
        assert!(store.get(b).unwrap().is_none());
        assert!(store.get(c).unwrap().is_some());
    }
}
