//! Order lifecycle errors.

use std::fmt;

use super::status::OrderStatus;

/// Errors that can occur while transitioning an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Operation not legal for the order's current status.
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// Current order status.
        status: OrderStatus,
    },

    /// Fill quantity exceeds the remaining fillable quantity.
    FillExceedsRemaining {
        /// Fill quantity attempted.
        fill_qty: i64,
        /// Remaining quantity.
        remaining_qty: i64,
    },

    /// No fillable quantity is left on the order.
    NothingToExecute,

    /// Invalid order parameters.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Amendment would drop the total quantity below the executed quantity.
    AmendBelowExecuted {
        /// Requested new quantity.
        new_quantity: i64,
        /// Quantity already executed.
        executed_qty: i64,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState { operation, status } => {
                write!(f, "Cannot {operation} order in status {status}")
            }
            Self::FillExceedsRemaining {
                fill_qty,
                remaining_qty,
            } => {
                write!(
                    f,
                    "Fill quantity {fill_qty} exceeds remaining {remaining_qty}"
                )
            }
            Self::NothingToExecute => {
                write!(f, "Nothing left to execute")
            }
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::AmendBelowExecuted {
                new_quantity,
                executed_qty,
            } => {
                write!(
                    f,
                    "Cannot amend quantity to {new_quantity}: {executed_qty} units already executed"
                )
            }
        }
    }
}

impl std::error::Error for OrderError {}
