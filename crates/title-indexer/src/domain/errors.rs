//! # Error Types

use thiserror::Error;

use crate::ports::store::StoreError;

/// Errors a handler can surface to the host.
///
/// Business conditions never appear here: reverted contract reads
/// downgrade to documented defaults, missing entities are classification
/// signal, and degenerate events are skipped. What remains is
/// infrastructure failure in the host-owned store.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The entity store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
