//! Supplier and client master data

use serde::{Deserialize, Serialize};

/// Input for creating a supplier or a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartyInput {
    pub name: String,
}

/// Resolved id + name summary, embedded in note listings and exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartySummary {
    pub id: i64,
    pub name: String,
}
