//! Batch-level cancellation shared between the orchestrator and the
//! notification dispatcher, honored between stages and between sends.

use tokio::sync::watch;

/// Creates a linked cancel handle/token pair for one batch.
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle { sender }, CancelToken { receiver })
}

/// Caller-side handle; cancelling is idempotent.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

/// Worker-side token. Cloneable so long-running operations can await
/// cancellation concurrently with their own timers.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the batch is cancelled. If the handle is dropped without
    /// cancelling, this pends forever.
    pub async fn cancelled(&mut self) {
        while !self.is_cancelled() {
            if self.receiver.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
