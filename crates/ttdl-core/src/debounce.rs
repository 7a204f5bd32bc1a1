//! Debounce via timer cancellation.
//!
//! A [`Debouncer`] keeps a single pending timer. Scheduling again aborts that
//! timer and starts a new one, so only the last call within the quiet period
//! runs. Once a timer fires, its action is spawned as its own task: a later
//! `schedule` or `cancel` never aborts an action that already started.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `action` after the quiet period unless another call supersedes it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        });
        if let Some(previous) = self.slot().replace(timer) {
            previous.abort();
        }
    }

    /// Drops the pending timer, if any. Returns true if one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(timer) => {
                let waiting = !timer.is_finished();
                timer.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.slot().take() {
            timer.abort();
        }
    }
}
