//! One-shot delayed completions that can be revoked.
//!
//! Each scheduled action races its sleep against a cancellation token and,
//! if the sleep wins, posts its ticket back to the session loop. Dropping a
//! [`DeferredAction`] revokes it. [`Deferred::shutdown`] revokes everything
//! still outstanding and waits for the tasks to finish.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tokio_util::task::TaskTracker;

pub struct Deferred {
    root: CancellationToken,
    tracker: TaskTracker,
    fired: mpsc::UnboundedSender<u64>,
}

/// Handle to one scheduled completion. Revoked on drop.
pub struct DeferredAction {
    ticket: u64,
    _guard: DropGuard,
}

impl DeferredAction {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

impl Deferred {
    /// Fired tickets are delivered on the returned receiver.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (fired, rx) = mpsc::unbounded_channel();
        let deferred = Self {
            root: CancellationToken::new(),
            tracker: TaskTracker::new(),
            fired,
        };
        (deferred, rx)
    }

    /// Post `ticket` after `delay` unless revoked first.
    pub fn schedule(&self, ticket: u64, delay: Duration) -> DeferredAction {
        let token = self.root.child_token();
        let cancelled = token.clone();
        let fired = self.fired.clone();

        self.tracker.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    tracing::debug!(ticket, "deferred completion revoked");
                }
                _ = tokio::time::sleep(delay) => {
                    // Receiver gone means the session already ended.
                    let _ = fired.send(ticket);
                }
            }
        });

        DeferredAction {
            ticket,
            _guard: token.drop_guard(),
        }
    }

    /// Number of scheduled tasks that have not finished yet.
    pub fn outstanding(&self) -> usize {
        self.tracker.len()
    }

    /// Revoke every outstanding action and wait until none is running.
    pub async fn shutdown(&self) {
        self.root.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (deferred, mut rx) = Deferred::new();
        let _action = deferred.schedule(3, Duration::from_millis(600));

        tokio::time::sleep(Duration::from_millis(599)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_revokes() {
        let (deferred, mut rx) = Deferred::new();
        let action = deferred.schedule(1, Duration::from_millis(100));
        assert_eq!(action.ticket(), 1);
        drop(action);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(deferred.outstanding(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_revokes_all() {
        let (deferred, mut rx) = Deferred::new();
        let a = deferred.schedule(1, Duration::from_secs(1));
        let b = deferred.schedule(2, Duration::from_secs(2));

        deferred.shutdown().await;
        assert_eq!(deferred.outstanding(), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
        drop((a, b));
    }
}
