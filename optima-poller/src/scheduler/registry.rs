//! Poll registry
//!
//! Per-key polling state. Entries are created on first use and never removed;
//! stopping a poll only deactivates its entry so a later start reuses it.

use optima_core::dto::status::StatusRequest;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::poller::PollCallback;

/// A scheduled, not yet fired, status check
pub(crate) struct PendingTimer {
    /// Distinguishes this timer from any later one scheduled for the same key
    pub id: u64,
    pub handle: JoinHandle<()>,
}

/// State of one tracked server-side task
pub(crate) struct PollEntry {
    /// True while the loop keeps scheduling checks
    pub is_running: bool,
    /// True while a status-check request is awaiting its response
    pub in_flight: bool,
    pub request: StatusRequest,
    pub callback: PollCallback,
    pub pending_timer: Option<PendingTimer>,
}

impl PollEntry {
    fn new(request: StatusRequest, callback: PollCallback) -> Self {
        Self {
            is_running: false,
            in_flight: false,
            request,
            callback,
            pending_timer: None,
        }
    }

    /// Cancels the pending timer and deactivates the entry
    ///
    /// An in-flight request is left alone. Returns whether the entry was running.
    pub fn stop(&mut self) -> bool {
        if !self.is_running {
            return false;
        }

        if let Some(timer) = self.pending_timer.take() {
            timer.handle.abort();
        }
        self.is_running = false;
        true
    }
}

/// Map from poll key to its entry
#[derive(Default)]
pub(crate) struct PollRegistry {
    entries: HashMap<String, PollEntry>,
    next_timer_id: u64,
}

impl PollRegistry {
    /// Returns the entry for `key`, creating a stopped one on first use
    ///
    /// The request and callback are replaced on an existing entry as well, so
    /// a running loop can be re-pointed without restarting it.
    pub fn get_or_create(
        &mut self,
        key: &str,
        request: StatusRequest,
        callback: PollCallback,
    ) -> &mut PollEntry {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                entry.request = request;
                entry.callback = callback;
                entry
            }
            Entry::Vacant(vacant) => vacant.insert(PollEntry::new(request, callback)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PollEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PollEntry> {
        self.entries.get_mut(key)
    }

    /// Stops every running entry, returning how many were stopped
    pub fn stop_all(&mut self) -> usize {
        self.entries
            .values_mut()
            .map(PollEntry::stop)
            .filter(|stopped| *stopped)
            .count()
    }

    /// Swaps every callback for a no-op, dropping whatever they captured
    pub fn release_callbacks(&mut self) {
        for entry in self.entries.values_mut() {
            entry.callback = Arc::new(|_| {});
        }
    }

    /// Keys of all running entries, sorted
    pub fn running_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_running)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn next_timer_id(&mut self) -> u64 {
        self.next_timer_id += 1;
        self.next_timer_id
    }
}
