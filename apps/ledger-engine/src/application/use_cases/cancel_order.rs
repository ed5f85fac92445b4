//! Cancel Order Use Case

use std::sync::Arc;

use super::amend_order::load_owned;
use crate::application::ports::{LedgerStore, StoreError};
use crate::application::services::OrderLockMap;
use crate::domain::order::Order;
use crate::domain::shared::{OrderId, UserId};
use crate::error::EngineError;

/// Use case for cancelling a pending order.
pub struct CancelOrderUseCase<L: LedgerStore> {
    ledger: Arc<L>,
    locks: Arc<OrderLockMap>,
    max_retries: u32,
}

impl<L: LedgerStore> CancelOrderUseCase<L> {
    /// Create a new `CancelOrderUseCase`.
    pub fn new(ledger: Arc<L>, locks: Arc<OrderLockMap>, max_retries: u32) -> Self {
        Self {
            ledger,
            locks,
            max_retries,
        }
    }

    /// Cancel the caller's order.
    ///
    /// Already-posted fills stay posted; the order keeps its executed
    /// quantity.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is absent or not owned by the caller.
    /// - `InvalidState` if the order is already executed or cancelled.
    /// - `StorageFailure` if the store stays contended past the retry bound.
    pub async fn execute(
        &self,
        caller: &UserId,
        order_id: &OrderId,
    ) -> Result<Order, EngineError> {
        let lock = self.locks.lock_for(order_id);
        let _guard = lock.lock().await;

        for _attempt in 0..=self.max_retries {
            let mut order = load_owned(self.ledger.as_ref(), caller, order_id).await?;
            order.cancel()?;

            match self.ledger.update_order(&order).await {
                Ok(version) => {
                    order.set_version(version);
                    tracing::info!(
                        order_id = %order.id(),
                        owner = %caller,
                        executed_qty = %order.executed_qty(),
                        "Order cancelled"
                    );
                    return Ok(order);
                }
                Err(StoreError::VersionConflict { .. }) => {
                    tracing::warn!(order_id = %order_id, "Cancel hit version conflict, retrying");
                }
                Err(e) => return Err(EngineError::storage_failure(e.to_string())),
            }
        }

        Err(EngineError::storage_failure(
            "Order update kept conflicting, giving up",
        ))
    }
}
