//! HTTP handlers for the C&R Logistics inventory backend

pub mod client;
pub mod export;
pub mod health;
pub mod note;
pub mod product;
pub mod supplier;

pub use client::*;
pub use export::*;
pub use health::*;
pub use note::*;
pub use product::*;
pub use supplier::*;

use serde::Serialize;

/// Confirmation body returned by every delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted_id: i64,
}
