//! Application layer - Use cases, ports, and coordination services.

pub mod ports;
pub mod services;
pub mod use_cases;
