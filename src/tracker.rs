//! Transaction tracker collaborator interface.
//!
//! Fire-and-forget status reporting for submitted transactions. The core
//! hands the submission handle and an optional notifier over and never
//! interprets the lifecycle events itself.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Notifier, TransactionId, TxHandle};

/// Tracks a submitted transaction through its lifecycle, reporting
/// progress to the caller's notifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionTracker: Send + Sync {
    async fn track(&self, handle: TxHandle, notifier: Option<Notifier>) -> Result<TransactionId>;
}
