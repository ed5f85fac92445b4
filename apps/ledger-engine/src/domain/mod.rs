//! Domain layer - Core business logic with no external dependencies.

pub mod order;
pub mod portfolio;
pub mod shared;
