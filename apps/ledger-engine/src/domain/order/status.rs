//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status.
///
/// Transitions:
/// - `Pending -> Executed` (terminal, only via full execution)
/// - `Pending -> Cancelled` (terminal)
///
/// Partial fills leave the order `Pending`; only `executed_qty == quantity`
/// moves it to `Executed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order is open; may be amended, cancelled, or filled.
    Pending,
    /// Order fully filled. Terminal.
    Executed,
    /// Order cancelled by its owner. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Cancelled)
    }

    /// Returns true if the order can be amended.
    #[must_use]
    pub const fn can_amend(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the order can be cancelled.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the order can receive fills.
    #[must_use]
    pub const fn can_fill(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Executed => write!(f, "EXECUTED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(OrderStatus::Pending, false; "pending is not terminal")]
    #[test_case(OrderStatus::Executed, true; "executed is terminal")]
    #[test_case(OrderStatus::Cancelled, true; "cancelled is terminal")]
    fn terminal_states(status: OrderStatus, expected: bool) {
        assert_eq!(status.is_terminal(), expected);
    }

    #[test_case(OrderStatus::Pending, true; "pending can fill")]
    #[test_case(OrderStatus::Executed, false; "executed cannot fill")]
    #[test_case(OrderStatus::Cancelled, false; "cancelled cannot fill")]
    fn fillable_states(status: OrderStatus, expected: bool) {
        assert_eq!(status.can_fill(), expected);
        assert_eq!(status.can_amend(), expected);
        assert_eq!(status.can_cancel(), expected);
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");

        let parsed: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn display_matches_wire_format() {
        assert_eq!(OrderStatus::Executed.to_string(), "EXECUTED");
    }
}
