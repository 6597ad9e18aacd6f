//! Handle to a running live subscription.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::provider::LogProvider;

/// A live subscription returned by [`EigenEvents::subscribe`](crate::EigenEvents::subscribe).
///
/// Dropping the handle leaves the delivery task running until the
/// underlying stream ends.
pub struct Subscription {
    id: String,
    task: JoinHandle<()>,
    /// Set once `task` has been awaited to completion; a `JoinHandle` must
    /// not be polled again after that.
    joined: bool,
    provider: Arc<dyn LogProvider>,
}

impl Subscription {
    pub(crate) fn new(id: String, task: JoinHandle<()>, provider: Arc<dyn LogProvider>) -> Self {
        Self {
            id,
            task,
            joined: false,
            provider,
        }
    }

    /// Node-assigned subscription id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `true` once the stream has ended and every event was delivered.
    pub fn is_finished(&self) -> bool {
        self.joined || self.task.is_finished()
    }

    /// Wait until the stream ends.
    pub async fn join(mut self) -> Result<(), ClientError> {
        self.wait().await
    }

    /// Like [`join`](Self::join) but keeps the handle, so the caller can
    /// still [`close`](Self::close) it. Returns at once if the stream has
    /// already been waited for; a task failure is reported only the first
    /// time.
    pub async fn wait(&mut self) -> Result<(), ClientError> {
        if self.joined {
            return Ok(());
        }
        let outcome = (&mut self.task).await;
        self.joined = true;
        outcome?;
        Ok(())
    }

    /// Stop delivery and cancel the feed on the node.
    pub async fn close(self) {
        self.task.abort();
        match self.provider.unsubscribe(&self.id).await {
            Ok(known) => debug!(subscription = %self.id, known, "unsubscribed"),
            Err(e) => warn!(subscription = %self.id, error = %e, "eth_unsubscribe failed"),
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("finished", &self.is_finished())
            .finish()
    }
}
