//! Ledger Store Port
//!
//! Persistence abstraction for the two durable collections this engine
//! owns: orders (by id, with an owner index) and portfolio holdings (by
//! `(owner, security)`). Implemented by adapters in the infrastructure
//! layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::order::Order;
use crate::domain::portfolio::PortfolioHolding;
use crate::domain::shared::{OrderId, Quantity, UserId};

/// Errors surfaced by ledger store adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Compare-and-swap failed: the stored order version differs from the
    /// version the caller read.
    #[error("Version conflict on order {order_id}")]
    VersionConflict {
        /// Order whose update conflicted.
        order_id: String,
    },

    /// An order with this id already exists.
    #[error("Duplicate order id {order_id}")]
    DuplicateOrder {
        /// Conflicting order id.
        order_id: String,
    },

    /// The order to update does not exist.
    #[error("No stored order with id {order_id}")]
    MissingOrder {
        /// Missing order id.
        order_id: String,
    },

    /// The store is unavailable or rejected the write.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for the durable ledger store.
///
/// Mutating order operations are compare-and-swap on the order's version;
/// callers re-read and retry on `VersionConflict`. `commit_fill` is the one
/// cross-entity write and must apply the order update and the holding delta
/// as a single atomic unit.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert a newly placed order.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateOrder` if the id is already present.
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;

    /// Look up an order by id. Ownership is checked by the caller.
    ///
    /// # Errors
    ///
    /// Fails only on store-level problems; absence is `Ok(None)`.
    async fn find_order(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Persist an amended or cancelled order.
    ///
    /// Compare-and-swap on `order.version()`; returns the new version.
    ///
    /// # Errors
    ///
    /// Fails with `VersionConflict` if the stored version moved, or
    /// `MissingOrder` if the order vanished.
    async fn update_order(&self, order: &Order) -> Result<u64, StoreError>;

    /// All orders owned by a user, newest first by creation.
    ///
    /// # Errors
    ///
    /// Fails only on store-level problems.
    async fn list_orders(&self, owner: &UserId) -> Result<Vec<Order>, StoreError>;

    /// Commit an executed fill: persist the updated order and merge the
    /// fill delta into the owner's holding for the order's security, as one
    /// atomic unit. Creates the holding if absent.
    ///
    /// Compare-and-swap on `order.version()`; returns the new version.
    ///
    /// # Errors
    ///
    /// Fails with `VersionConflict` on a stale read; neither side of the
    /// write is applied in that case.
    async fn commit_fill(&self, order: &Order, delta: Quantity) -> Result<u64, StoreError>;

    /// All holdings owned by a user, sorted by security.
    ///
    /// # Errors
    ///
    /// Fails only on store-level problems.
    async fn list_holdings(&self, owner: &UserId) -> Result<Vec<PortfolioHolding>, StoreError>;
}
