//! Order Aggregate
//!
//! Lifecycle transitions and partial-fill accounting for a single order.

pub mod errors;
pub mod order;
pub mod status;

pub use errors::OrderError;
pub use order::{FillOutcome, Order, PlaceOrderCommand, ReconstitutedOrderParams};
pub use status::OrderStatus;
