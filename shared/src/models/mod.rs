//! Domain models for the catalog and the pedido-note ledger

pub mod note;
pub mod party;
pub mod product;

pub use note::*;
pub use party::*;
pub use product::*;
