//! Order Aggregate Root
//!
//! Owns the order lifecycle: placement, amendment, cancellation and
//! partial-fill accounting. All quantity invariants are enforced here:
//! `0 <= executed_qty <= quantity`, and `status == Executed` exactly when
//! `executed_qty == quantity`.

use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::status::OrderStatus;
use crate::domain::shared::{OrderId, Quantity, Security, Timestamp, UserId};

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    /// Identity of the placing user.
    pub owner: UserId,
    /// Security to trade.
    pub security: Security,
    /// Total requested size.
    pub quantity: Quantity,
}

impl PlaceOrderCommand {
    /// Validate the command parameters.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidParameters` if the security is empty or
    /// the quantity is not strictly positive.
    pub fn validate(&self) -> Result<(), OrderError> {
        self.security
            .validate()
            .map_err(|e| OrderError::InvalidParameters {
                field: "security".to_string(),
                message: e.to_string(),
            })?;

        self.quantity
            .validate_for_order()
            .map_err(|e| OrderError::InvalidParameters {
                field: "quantity".to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Parameters for reconstituting an Order from storage.
///
/// Used by ledger adapters to rebuild aggregates from persisted state;
/// bypasses placement validation because the state is already known valid.
#[derive(Debug, Clone)]
pub struct ReconstitutedOrderParams {
    /// Order identifier.
    pub id: OrderId,
    /// Owning user.
    pub owner: UserId,
    /// Security being traded.
    pub security: Security,
    /// Total requested size.
    pub quantity: Quantity,
    /// Quantity executed so far.
    pub executed_qty: Quantity,
    /// Current status.
    pub status: OrderStatus,
    /// Optimistic-concurrency version.
    pub version: u64,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Outcome of applying a fill to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// Quantity actually filled.
    pub filled: Quantity,
    /// Status after the fill.
    pub status: OrderStatus,
}

/// Order Aggregate Root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    owner: UserId,
    security: Security,
    quantity: Quantity,
    executed_qty: Quantity,
    status: OrderStatus,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Place a new order.
    ///
    /// # Errors
    ///
    /// Returns error if command validation fails.
    pub fn place(cmd: PlaceOrderCommand) -> Result<Self, OrderError> {
        cmd.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::generate(),
            owner: cmd.owner,
            security: cmd.security,
            quantity: cmd.quantity,
            executed_qty: Quantity::ZERO,
            status: OrderStatus::Pending,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an order from stored state.
    #[must_use]
    pub fn reconstitute(params: ReconstitutedOrderParams) -> Self {
        Self {
            id: params.id,
            owner: params.owner,
            security: params.security,
            quantity: params.quantity,
            executed_qty: params.executed_qty,
            status: params.status,
            version: params.version,
            created_at: params.created_at,
            updated_at: params.updated_at,
        }
    }

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the owning user.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Get the security.
    #[must_use]
    pub const fn security(&self) -> &Security {
        &self.security
    }

    /// Get the total requested quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Get the executed quantity.
    #[must_use]
    pub const fn executed_qty(&self) -> Quantity {
        self.executed_qty
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Remaining fillable quantity: `quantity - executed_qty`.
    #[must_use]
    pub fn remaining(&self) -> Quantity {
        self.quantity - self.executed_qty
    }

    /// Check ownership against a caller identity.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }

    /// Replace the total quantity of a pending order.
    ///
    /// Amendments must stay strictly above the executed quantity so that the
    /// `executed_qty <= quantity` invariant holds and completion is only
    /// ever reached through fills.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the order is not pending.
    /// - `InvalidParameters` if the new quantity is not strictly positive.
    /// - `AmendBelowExecuted` if the new quantity does not exceed the
    ///   executed quantity.
    pub fn amend(&mut self, new_quantity: Quantity) -> Result<(), OrderError> {
        if !self.status.can_amend() {
            return Err(OrderError::InvalidState {
                operation: "amend",
                status: self.status,
            });
        }

        new_quantity
            .validate_for_order()
            .map_err(|e| OrderError::InvalidParameters {
                field: "quantity".to_string(),
                message: e.to_string(),
            })?;

        if new_quantity <= self.executed_qty {
            return Err(OrderError::AmendBelowExecuted {
                new_quantity: new_quantity.units(),
                executed_qty: self.executed_qty.units(),
            });
        }

        self.quantity = new_quantity;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancel a pending order.
    ///
    /// A cancelled order retains its executed quantity; already-posted
    /// fills are never reversed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the order is not pending.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidState {
                operation: "cancel",
                status: self.status,
            });
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Apply an operator-approved fill to the order.
    ///
    /// Moves the order to `Executed` exactly when the fill consumes the
    /// full remaining quantity.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the order is not pending.
    /// - `InvalidParameters` if the fill quantity is not strictly positive.
    /// - `NothingToExecute` if no fillable quantity remains.
    /// - `FillExceedsRemaining` if the fill exceeds the remaining quantity.
    pub fn apply_fill(&mut self, fill: Quantity) -> Result<FillOutcome, OrderError> {
        if !self.status.can_fill() {
            return Err(OrderError::InvalidState {
                operation: "execute",
                status: self.status,
            });
        }

        if !fill.is_positive() {
            return Err(OrderError::InvalidParameters {
                field: "fill_qty".to_string(),
                message: format!("must be a positive number of units, got {fill}"),
            });
        }

        let remaining = self.remaining();
        if !remaining.is_positive() {
            return Err(OrderError::NothingToExecute);
        }
        if fill > remaining {
            return Err(OrderError::FillExceedsRemaining {
                fill_qty: fill.units(),
                remaining_qty: remaining.units(),
            });
        }

        self.executed_qty = self.executed_qty + fill;
        if self.executed_qty == self.quantity {
            self.status = OrderStatus::Executed;
        }
        self.updated_at = Timestamp::now();

        Ok(FillOutcome {
            filled: fill,
            status: self.status,
        })
    }

    /// Set the version after a successful store commit.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(qty: i64) -> Order {
        Order::place(PlaceOrderCommand {
            owner: UserId::new("alice"),
            security: Security::new("TCS"),
            quantity: Quantity::new(qty),
        })
        .unwrap()
    }

    #[test]
    fn place_starts_pending_with_zero_executed() {
        let order = place(100);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.executed_qty(), Quantity::ZERO);
        assert_eq!(order.remaining(), Quantity::new(100));
        assert_eq!(order.version(), 0);
    }

    #[test]
    fn place_rejects_empty_security() {
        let result = Order::place(PlaceOrderCommand {
            owner: UserId::new("alice"),
            security: Security::new("  "),
            quantity: Quantity::new(10),
        });
        assert!(matches!(
            result,
            Err(OrderError::InvalidParameters { ref field, .. }) if field == "security"
        ));
    }

    #[test]
    fn place_rejects_non_positive_quantity() {
        let result = Order::place(PlaceOrderCommand {
            owner: UserId::new("alice"),
            security: Security::new("TCS"),
            quantity: Quantity::new(0),
        });
        assert!(matches!(
            result,
            Err(OrderError::InvalidParameters { ref field, .. }) if field == "quantity"
        ));
    }

    #[test]
    fn amend_replaces_quantity_while_pending() {
        let mut order = place(100);
        order.amend(Quantity::new(150)).unwrap();
        assert_eq!(order.quantity(), Quantity::new(150));
    }

    #[test]
    fn amend_rejects_quantity_at_or_below_executed() {
        let mut order = place(100);
        order.apply_fill(Quantity::new(40)).unwrap();

        // Below executed.
        assert!(matches!(
            order.amend(Quantity::new(30)),
            Err(OrderError::AmendBelowExecuted { .. })
        ));
        // Exactly executed: would complete the order outside the fill path.
        assert!(matches!(
            order.amend(Quantity::new(40)),
            Err(OrderError::AmendBelowExecuted { .. })
        ));
        // Above executed is fine.
        order.amend(Quantity::new(41)).unwrap();
        assert_eq!(order.quantity(), Quantity::new(41));
    }

    #[test]
    fn amend_fails_after_cancel() {
        let mut order = place(50);
        order.cancel().unwrap();
        assert!(matches!(
            order.amend(Quantity::new(60)),
            Err(OrderError::InvalidState { .. })
        ));
    }

    #[test]
    fn cancel_retains_executed_qty() {
        let mut order = place(100);
        order.apply_fill(Quantity::new(30)).unwrap();
        order.cancel().unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.executed_qty(), Quantity::new(30));
    }

    #[test]
    fn cancel_is_not_repeatable() {
        let mut order = place(50);
        order.cancel().unwrap();
        assert!(matches!(
            order.cancel(),
            Err(OrderError::InvalidState { .. })
        ));
    }

    #[test]
    fn partial_fill_keeps_order_pending() {
        let mut order = place(100);
        let outcome = order.apply_fill(Quantity::new(40)).unwrap();

        assert_eq!(outcome.filled, Quantity::new(40));
        assert_eq!(outcome.status, OrderStatus::Pending);
        assert_eq!(order.executed_qty(), Quantity::new(40));
        assert_eq!(order.remaining(), Quantity::new(60));
    }

    #[test]
    fn full_fill_moves_to_executed() {
        let mut order = place(100);
        order.apply_fill(Quantity::new(40)).unwrap();
        let outcome = order.apply_fill(Quantity::new(60)).unwrap();

        assert_eq!(outcome.status, OrderStatus::Executed);
        assert_eq!(order.executed_qty(), order.quantity());
        assert_eq!(order.remaining(), Quantity::ZERO);
    }

    #[test]
    fn fill_on_executed_order_fails_invalid_state() {
        let mut order = place(10);
        order.apply_fill(Quantity::new(10)).unwrap();
        assert!(matches!(
            order.apply_fill(Quantity::new(1)),
            Err(OrderError::InvalidState { .. })
        ));
    }

    #[test]
    fn fill_on_cancelled_order_fails_invalid_state() {
        let mut order = place(10);
        order.cancel().unwrap();
        assert!(matches!(
            order.apply_fill(Quantity::new(1)),
            Err(OrderError::InvalidState { .. })
        ));
    }

    #[test]
    fn zero_fill_is_rejected() {
        let mut order = place(10);
        assert!(matches!(
            order.apply_fill(Quantity::ZERO),
            Err(OrderError::InvalidParameters { .. })
        ));
        assert_eq!(order.executed_qty(), Quantity::ZERO);
    }

    #[test]
    fn overfill_is_rejected_and_leaves_order_unchanged() {
        let mut order = place(10);
        assert!(matches!(
            order.apply_fill(Quantity::new(11)),
            Err(OrderError::FillExceedsRemaining { .. })
        ));
        assert_eq!(order.executed_qty(), Quantity::ZERO);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn invariant_holds_across_fills() {
        let mut order = place(100);
        for _ in 0..10 {
            order.apply_fill(Quantity::new(10)).unwrap();
            assert!(order.executed_qty() <= order.quantity());
            assert_eq!(
                order.status() == OrderStatus::Executed,
                order.executed_qty() == order.quantity()
            );
        }
    }

    #[test]
    fn reconstitute_preserves_fields() {
        let original = place(100);
        let copy = Order::reconstitute(ReconstitutedOrderParams {
            id: original.id().clone(),
            owner: original.owner().clone(),
            security: original.security().clone(),
            quantity: original.quantity(),
            executed_qty: original.executed_qty(),
            status: original.status(),
            version: 7,
            created_at: original.created_at(),
            updated_at: original.updated_at(),
        });

        assert_eq!(copy.id(), original.id());
        assert_eq!(copy.version(), 7);
        assert_eq!(copy.status(), original.status());
    }

    #[test]
    fn ownership_check() {
        let order = place(10);
        assert!(order.is_owned_by(&UserId::new("alice")));
        assert!(!order.is_owned_by(&UserId::new("bob")));
    }
}
