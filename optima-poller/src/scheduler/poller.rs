//! Task poller
//!
//! Keeps a registry of named polling loops. A loop issues one status check,
//! delivers the response to its callback, and schedules the next check after
//! the configured interval while the server reports the task as `started`.
//! Any other status, or a failed request, ends the loop.
//!
//! Per key there is never more than one request in flight or one timer
//! pending. Stopping a loop cancels its pending timer but never the request
//! already in flight: that response is still delivered, it just does not
//! schedule a follow-up. A key counts as in flight until its callback has
//! returned, so deliveries for one key never overlap.

use optima_client::ClientError;
use optima_core::domain::task::TaskStatus;
use optima_core::dto::status::StatusRequest;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, info};

use super::registry::{PendingTimer, PollRegistry};
use crate::config::PollerConfig;
use crate::error::PollerError;
use crate::repository::StatusRepository;

/// Outcome of one status check, as handed to a poll's callback
pub type PollResult = Result<TaskStatus, ClientError>;

/// Receives every response of a polling loop, in arrival order
pub type PollCallback = Arc<dyn Fn(PollResult) + Send + Sync>;

/// Handle to a set of named polling loops
///
/// Clones share the same registry. Dropping the last clone cancels every
/// pending timer. Must be used from within a tokio runtime.
///
/// Callbacks are owned by the poller, so a callback that captures a clone
/// keeps it alive. Capture a [`WeakTaskPoller`] from [`TaskPoller::downgrade`]
/// instead, or end the session with [`TaskPoller::shutdown`].
#[derive(Clone)]
pub struct TaskPoller {
    inner: Arc<Inner>,
}

/// Non-owning handle to a [`TaskPoller`], for use inside callbacks
#[derive(Clone)]
pub struct WeakTaskPoller {
    inner: Weak<Inner>,
}

impl WeakTaskPoller {
    /// Returns the poller if any strong handle is still alive
    pub fn upgrade(&self) -> Option<TaskPoller> {
        self.inner.upgrade().map(|inner| TaskPoller { inner })
    }
}

struct Inner {
    repository: Arc<dyn StatusRepository>,
    interval: Duration,
    registry: Mutex<PollRegistry>,
}

impl TaskPoller {
    /// Creates a poller using the interval from `config`
    pub fn new(repository: Arc<dyn StatusRepository>, config: &PollerConfig) -> Self {
        Self::with_interval(repository, config.poll_interval)
    }

    /// Creates a poller with an explicit delay between consecutive checks
    pub fn with_interval(repository: Arc<dyn StatusRepository>, interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                repository,
                interval,
                registry: Mutex::new(PollRegistry::default()),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub fn downgrade(&self) -> WeakTaskPoller {
        WeakTaskPoller {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Starts polling `request` under `key`
    ///
    /// The request and callback of the entry are always replaced. If the loop
    /// is already running nothing else happens; otherwise it is marked running
    /// and a status check is issued right away.
    ///
    /// # Errors
    /// [`PollerError::EmptyKey`] if `key` is empty or whitespace.
    pub fn start_poll<F>(
        &self,
        key: impl Into<String>,
        request: StatusRequest,
        callback: F,
    ) -> Result<(), PollerError>
    where
        F: Fn(PollResult) + Send + Sync + 'static,
    {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(PollerError::EmptyKey);
        }

        let mut registry = self.inner.lock();
        let entry = registry.get_or_create(&key, request, Arc::new(callback));

        if entry.is_running {
            debug!("Poll {} already running, callback updated", key);
            return Ok(());
        }
        entry.is_running = true;

        // A response from before the last stop is still outstanding; it
        // carries the chain on instead of a second concurrent request.
        if entry.in_flight {
            debug!("Poll {} restarted while a check is in flight", key);
            return Ok(());
        }
        entry.in_flight = true;
        let request = entry.request.clone();
        drop(registry);

        info!("Starting poll {} ({})", key, request);
        self.inner.spawn_check(key, request);
        Ok(())
    }

    /// Stops the loop for `key`
    ///
    /// Unknown or already stopped keys are ignored.
    pub fn stop_poll(&self, key: &str) {
        let mut registry = self.inner.lock();
        if let Some(entry) = registry.get_mut(key) {
            if entry.stop() {
                info!("Stopped poll {}", key);
            }
        }
    }

    /// Stops every running loop
    pub fn stop_all_polls(&self) {
        let stopped = self.inner.lock().stop_all();
        if stopped > 0 {
            info!("Stopped {} poll(s)", stopped);
        }
    }

    /// Stops every loop and releases every callback
    ///
    /// Responses still in flight are discarded. Callbacks holding a clone of
    /// this poller no longer keep it alive afterwards. Keys can be started
    /// again with fresh callbacks.
    pub fn shutdown(&self) {
        let mut registry = self.inner.lock();
        let stopped = registry.stop_all();
        registry.release_callbacks();
        info!("Poller shut down, {} poll(s) stopped", stopped);
    }

    pub fn is_running(&self, key: &str) -> bool {
        self.inner
            .lock()
            .get(key)
            .is_some_and(|entry| entry.is_running)
    }

    /// Whether `key` has ever been started
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().get(key).is_some()
    }

    /// Keys of all running loops, sorted
    pub fn running_keys(&self) -> Vec<String> {
        self.inner.lock().running_keys()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, PollRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issues one status check in the background
    fn spawn_check(self: &Arc<Self>, key: String, request: StatusRequest) {
        let repository = Arc::clone(&self.repository);
        let poller = Arc::downgrade(self);

        tokio::spawn(async move {
            debug!("Checking {} ({})", key, request);
            let result = repository.check_status(&request).await;

            match poller.upgrade() {
                Some(inner) => inner.handle_response(&key, result),
                None => debug!("Poller dropped, discarding response for {}", key),
            }
        });
    }

    fn handle_response(self: &Arc<Self>, key: &str, result: PollResult) {
        let keep_polling = matches!(&result, Ok(status) if status.is_started());

        let callback = {
            let mut registry = self.lock();
            let Some(entry) = registry.get_mut(key) else {
                return;
            };

            if !keep_polling && entry.is_running {
                entry.is_running = false;
                match &result {
                    Ok(status) => info!("Poll {} finished with status {}", key, status),
                    Err(e) => debug!("Poll {} stopped after failed check: {}", key, e),
                }
            }

            Arc::clone(&entry.callback)
        };

        // The lock is released so the callback may start or stop polls. The
        // entry stays in flight until it returns.
        let delivered = panic::catch_unwind(AssertUnwindSafe(|| callback(result)));
        self.finish_delivery(key, keep_polling);

        if let Err(payload) = delivered {
            panic::resume_unwind(payload);
        }
    }

    /// Clears the in-flight mark and carries the loop on if it is running
    fn finish_delivery(self: &Arc<Self>, key: &str, keep_polling: bool) {
        let restart = {
            let mut registry = self.lock();
            let Some(entry) = registry.get_mut(key) else {
                return;
            };
            entry.in_flight = false;

            if !entry.is_running {
                return;
            }

            // A terminal response whose callback restarted the key
            if !keep_polling {
                entry.in_flight = true;
                Some(entry.request.clone())
            } else {
                None
            }
        };

        match restart {
            Some(request) => {
                debug!("Poll {} restarted from its callback", key);
                self.spawn_check(key.to_string(), request);
            }
            None => self.schedule_next(key),
        }
    }

    /// Schedules the next check for `key` if its loop is still running
    fn schedule_next(self: &Arc<Self>, key: &str) {
        let mut registry = self.lock();
        let timer_id = registry.next_timer_id();
        let Some(entry) = registry.get_mut(key) else {
            return;
        };

        if !entry.is_running || entry.in_flight || entry.pending_timer.is_some() {
            return;
        }

        let poller = Arc::downgrade(self);
        let interval = self.interval;
        let owned_key = key.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(interval).await;

            if let Some(inner) = poller.upgrade() {
                inner.fire_timer(&owned_key, timer_id);
            }
        });

        entry.pending_timer = Some(PendingTimer {
            id: timer_id,
            handle,
        });
    }

    fn fire_timer(self: &Arc<Self>, key: &str, timer_id: u64) {
        let request = {
            let mut registry = self.lock();
            let Some(entry) = registry.get_mut(key) else {
                return;
            };

            // Superseded by a stop or a newer timer
            if !entry
                .pending_timer
                .as_ref()
                .is_some_and(|timer| timer.id == timer_id)
            {
                return;
            }
            entry.pending_timer = None;

            if !entry.is_running || entry.in_flight {
                return;
            }
            entry.in_flight = true;
            entry.request.clone()
        };

        self.spawn_check(key.to_string(), request);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.registry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .stop_all();
    }
}
