//! HTTP handlers for client endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::client::{Client, ClientService};
use crate::AppState;
use shared::CreatePartyInput;

/// List all clients
pub async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let service = ClientService::new(state.db);
    let clients = service.list().await?;
    Ok(Json(clients))
}

/// Create a client
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreatePartyInput>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.create(input).await?;
    Ok(Json(client))
}

/// Delete a client, guarded against existing references
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
) -> AppResult<Json<DeletedResponse>> {
    let service = ClientService::new(state.db);
    service.delete(client_id).await?;
    Ok(Json(DeletedResponse {
        deleted_id: client_id,
    }))
}
