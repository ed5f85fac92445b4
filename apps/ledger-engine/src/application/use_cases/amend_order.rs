//! Amend Order Use Case

use std::sync::Arc;

use crate::application::ports::{LedgerStore, StoreError};
use crate::application::services::OrderLockMap;
use crate::domain::order::Order;
use crate::domain::shared::{OrderId, Quantity, UserId};
use crate::error::EngineError;

/// Use case for amending the quantity of a pending order.
pub struct AmendOrderUseCase<L: LedgerStore> {
    ledger: Arc<L>,
    locks: Arc<OrderLockMap>,
    max_retries: u32,
}

impl<L: LedgerStore> AmendOrderUseCase<L> {
    /// Create a new `AmendOrderUseCase`.
    pub fn new(ledger: Arc<L>, locks: Arc<OrderLockMap>, max_retries: u32) -> Self {
        Self {
            ledger,
            locks,
            max_retries,
        }
    }

    /// Amend the caller's order to a new total quantity.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is absent or not owned by the caller.
    /// - `InvalidState` if the order is not pending.
    /// - `InvalidInput` if the new quantity is non-positive or does not
    ///   exceed the executed quantity.
    /// - `StorageFailure` if the store stays contended past the retry bound.
    pub async fn execute(
        &self,
        caller: &UserId,
        order_id: &OrderId,
        new_quantity: Quantity,
    ) -> Result<Order, EngineError> {
        let lock = self.locks.lock_for(order_id);
        let _guard = lock.lock().await;

        for _attempt in 0..=self.max_retries {
            let mut order = load_owned(self.ledger.as_ref(), caller, order_id).await?;
            order.amend(new_quantity)?;

            match self.ledger.update_order(&order).await {
                Ok(version) => {
                    order.set_version(version);
                    tracing::info!(
                        order_id = %order.id(),
                        owner = %caller,
                        quantity = %new_quantity,
                        "Order amended"
                    );
                    return Ok(order);
                }
                Err(StoreError::VersionConflict { .. }) => {
                    tracing::warn!(order_id = %order_id, "Amend hit version conflict, retrying");
                }
                Err(e) => return Err(EngineError::storage_failure(e.to_string())),
            }
        }

        Err(EngineError::storage_failure(
            "Order update kept conflicting, giving up",
        ))
    }
}

/// Load an order and enforce ownership.
///
/// Absence and foreign ownership both surface as `NotFound` so callers can
/// never probe for other users' order ids.
pub(crate) async fn load_owned<L: LedgerStore>(
    ledger: &L,
    caller: &UserId,
    order_id: &OrderId,
) -> Result<Order, EngineError> {
    let order = ledger
        .find_order(order_id)
        .await
        .map_err(|e| EngineError::storage_failure(e.to_string()))?
        .ok_or_else(EngineError::order_not_found)?;

    if !order.is_owned_by(caller) {
        return Err(EngineError::order_not_found());
    }
    Ok(order)
}
