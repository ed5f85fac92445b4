//! Application services: process-local coordination helpers.

pub mod order_locks;

pub use order_locks::OrderLockMap;
