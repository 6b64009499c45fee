//! Request cancellation
//!
//! A [`CancelToken`] is handed to every fetch. [`RequestTracker`] gives out
//! a fresh token per request and cancels the previous one, so an abandoned
//! request stops paginating and can never deliver stale results.

use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Cloneable cancellation flag shared between a request and whoever may abandon it
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        CancelToken {
            state: Arc::new(state),
        }
    }

    /// Marks the token cancelled; every clone observes it
    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }

    /// Resolves once the token is cancelled
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this only returns once the flag is set
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Latest-request-wins bookkeeping
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: Mutex<Option<CancelToken>>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the in-flight request, if any, and returns the token for a new one
    pub fn begin(&self) -> CancelToken {
        let token = CancelToken::new();
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancels the in-flight request without starting another
    ///
    /// Returns `false` when there was nothing live to cancel: no request in
    /// flight, or the current one was already cancelled.
    pub fn cancel_current(&self) -> bool {
        let current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match current.as_ref() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Marks the request owning `token` as done, unless a newer one replaced it
    pub fn finish(&self, token: &CancelToken) {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if current
            .as_ref()
            .is_some_and(|live| Arc::ptr_eq(&live.state, &token.state))
        {
            *current = None;
        }
    }
}
