//! Application use cases, one per engine operation.

pub mod amend_order;
pub mod cancel_order;
pub mod execute_order;
pub mod place_order;
pub mod queries;

pub use amend_order::AmendOrderUseCase;
pub use cancel_order::CancelOrderUseCase;
pub use execute_order::{ExecuteOrderUseCase, ExecutionReceipt};
pub use place_order::PlaceOrderUseCase;
pub use queries::QueryUseCase;
