//! Per-order serialization guard.
//!
//! Every mutating operation on an order (amend, cancel, execute) holds the
//! order's exclusive scope for its whole read-validate-write sequence, so
//! two concurrent executions of one order cannot both read the same
//! remaining quantity. Locks are keyed by order id; unrelated orders never
//! contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use crate::domain::shared::OrderId;

/// Hands out one async mutex per order id.
///
/// The map itself is guarded by a short-lived std mutex; the per-order
/// mutexes are held across awaits for the duration of an operation.
///
/// Entries are never evicted: orders are never deleted, so the map grows
/// in step with the order collection itself, one small `Arc` per mutated
/// order.
#[derive(Debug, Default)]
pub struct OrderLockMap {
    locks: Mutex<HashMap<OrderId, Arc<AsyncMutex<()>>>>,
}

impl OrderLockMap {
    /// Create an empty lock map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the lock for an order, creating it on first use.
    ///
    /// Poisoning of the map mutex is ignored; the map only ever grows and
    /// a half-finished insert cannot corrupt existing entries.
    #[must_use]
    pub fn lock_for(&self, id: &OrderId) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(locks.entry(id.clone()).or_default())
    }
}
