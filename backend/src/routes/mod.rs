//! Route definitions for the C&R Logistics inventory backend

use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes. Everything except the health check sits behind the
/// Basic gate, which needs the state for its credential verifier.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - catalog
        .nest("/suppliers", supplier_routes(state.clone()))
        .nest("/clients", client_routes(state.clone()))
        .nest("/products", product_routes(state.clone()))
        // Protected routes - pedido note ledger
        .nest("/notes", note_routes(state))
}

/// Supplier routes (protected)
fn supplier_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route("/:supplier_id", delete(handlers::delete_supplier))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Client routes (protected)
fn client_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route("/:client_id", delete(handlers::delete_client))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Product routes (protected)
fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Pedido note routes (protected). The export route is registered before
/// the id route so "export" never parses as a note id.
fn note_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_notes).post(handlers::create_note))
        .route("/export", get(handlers::export_notes))
        .route("/:note_id", delete(handlers::delete_note))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
