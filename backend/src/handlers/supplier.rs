//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::supplier::{Supplier, SupplierService};
use crate::AppState;
use shared::CreatePartyInput;

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list().await?;
    Ok(Json(suppliers))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreatePartyInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok(Json(supplier))
}

/// Delete a supplier, guarded against existing references
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<Json<DeletedResponse>> {
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(Json(DeletedResponse {
        deleted_id: supplier_id,
    }))
}
