//! Operation-scoped cancellation.
//!
//! [`OperationCancellation`] is handed to the orchestrator loop and to any
//! external actor that may want to stop it (a Ctrl-C handler, a newer
//! request superseding this one). Cancellation is cooperative: the loop reads
//! the token between iterations and never interrupts a wave in flight.
//!
//! The flag and the reason live behind one mutex, so a reader never sees a
//! cancelled token without its reason. A
//! [`CancellationToken`](tokio_util::sync::CancellationToken) is tripped
//! alongside so async code can `await` the cancellation.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Cloneable, first-reason-wins cancellation handle.
///
/// There is no reset; a new operation needs a new token.
#[derive(Debug, Clone, Default)]
pub struct OperationCancellation {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    reason: Mutex<Option<String>>,
    token: CancellationToken,
}

impl OperationCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    ///
    /// Returns `true` if this call cancelled the operation, `false` if it was
    /// already cancelled (the original reason is kept).
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let mut guard = self.lock();
        if guard.is_some() {
            return false;
        }
        *guard = Some(reason.into());
        // Trip the async token while still holding the lock so awaiters
        // woken by it always find the reason set
        self.inner.token.cancel();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().is_some()
    }

    /// The reason given by the first `cancel` call
    pub fn reason(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Resolves once the operation has been cancelled.
    pub async fn cancelled(&self) {
        self.inner.token.cancelled().await
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a consistent Option
        self.inner
            .reason
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
