//! Shared Domain Types
//!
//! Value objects and errors shared across the order and portfolio
//! aggregates.

pub mod errors;
pub mod identifiers;
pub mod quantity;
pub mod security;
pub mod timestamp;

pub use errors::DomainError;
pub use identifiers::{OrderId, UserId};
pub use quantity::Quantity;
pub use security::Security;
pub use timestamp::Timestamp;
