//! Shared types and domain rules for the C&R Logistics inventory platform
//!
//! This crate contains the pure (no I/O) core: entity enums and input
//! types, product-code generation, stock arithmetic and the validation
//! rules enforced before any write reaches the ledger.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
