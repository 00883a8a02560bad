//! Transient error banner shared by every store.
//! 所有 store 共享的临时错误提示。
//!
//! Holds at most one message. Setting a message cancels the pending
//! auto-clear of the previous one and schedules its own, so the visible
//! message is always the most recent one and is dismissed only by its own
//! timer or by an explicit clear.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::AbortHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

#[derive(Default)]
struct PendingClear {
    generation: u64,
    handle: Option<AbortHandle>,
}

struct Inner {
    pending: Mutex<PendingClear>,
    message: watch::Sender<Option<String>>,
    clear_after: Duration,
}

pub struct ErrorChannel {
    inner: Arc<Inner>,
}

impl ErrorChannel {
    pub fn new(clear_after: Duration) -> Self {
        let (message, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                pending: Mutex::new(PendingClear::default()),
                message,
                clear_after,
            }),
        }
    }

    pub fn clear_after(&self) -> Duration {
        self.inner.clear_after
    }

    /// Currently visible message, if any.
    pub fn message(&self) -> Option<String> {
        self.inner.message.borrow().clone()
    }

    /// Observe message changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.message.subscribe()
    }

    /// `Some` replaces the message and restarts the auto-clear timer,
    /// `None` clears immediately without scheduling anything.
    pub async fn set_error(&self, message: Option<String>) {
        let mut pending = self.inner.pending.lock().await;
        if let Some(previous) = pending.handle.take() {
            previous.abort();
        }
        pending.generation += 1;

        let Some(message) = message else {
            self.inner.message.send_replace(None);
            debug!("error cleared");
            return;
        };

        warn!(message = %message, "error raised");
        self.inner.message.send_replace(Some(message));

        let generation = pending.generation;
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            sleep(inner.clear_after).await;
            let mut pending = inner.pending.lock().await;
            // An aborted task can still be past its sleep when the abort lands.
            if pending.generation == generation {
                pending.handle = None;
                inner.message.send_replace(None);
                debug!(generation, "error auto-cleared");
            }
        });
        pending.handle = Some(handle.abort_handle());
    }

    pub async fn raise(&self, message: impl Into<String>) {
        self.set_error(Some(message.into())).await;
    }

    pub async fn clear(&self) {
        self.set_error(None).await;
    }
}
