//! Portfolio holding: a user's accumulated quantity of one security.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Quantity, Security, UserId};

/// A user's running position in one security.
///
/// Keyed by `(owner, security)`. Created on the first fill for that pair
/// and only ever grows by additive fill deltas; holdings are never reduced
/// or deleted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioHolding {
    owner: UserId,
    security: Security,
    quantity: Quantity,
}

impl PortfolioHolding {
    /// Open a holding with an initial fill delta.
    #[must_use]
    pub fn open(owner: UserId, security: Security, quantity: Quantity) -> Self {
        Self {
            owner,
            security,
            quantity,
        }
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

    /// Get the accumulated quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Merge a fill delta into the holding.
    ///
    /// The delta is positive by caller contract (the Execution Coordinator
    /// validates fills before posting them); a non-positive delta is still
    /// rejected here to keep the never-decreases invariant local.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if the delta is not
    /// strictly positive or the accumulated quantity would overflow.
    pub fn apply_delta(&mut self, delta: Quantity) -> Result<(), DomainError> {
        if !delta.is_positive() {
            return Err(DomainError::InvariantViolation {
                aggregate: "PortfolioHolding".to_string(),
                invariant: "fill deltas are strictly positive".to_string(),
            });
        }

        self.quantity =
            self.quantity
                .checked_add(delta)
                .ok_or_else(|| DomainError::InvariantViolation {
                    aggregate: "PortfolioHolding".to_string(),
                    invariant: "accumulated quantity must not overflow".to_string(),
                })?;
        Ok(())
    }
}
