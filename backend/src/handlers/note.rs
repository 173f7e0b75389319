//! HTTP handlers for pedido note endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::note::{CreatedNote, NoteService, NoteWithItems};
use crate::AppState;
use shared::{CreateNoteInput, DateRange};

/// Query parameters for the note listing.
#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub q: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// List notes with items and resolved counterparties
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> AppResult<Json<Vec<NoteWithItems>>> {
    let service = NoteService::new(state.db);
    let range = DateRange {
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let notes = service.list(query.q.as_deref(), range).await?;
    Ok(Json(notes))
}

/// Create a note with its items atomically
pub async fn create_note(
    State(state): State<AppState>,
    Json(input): Json<CreateNoteInput>,
) -> AppResult<Json<CreatedNote>> {
    let service = NoteService::new(state.db);
    let created = service.create(input).await?;
    Ok(Json(created))
}

/// Delete a note and its items atomically
pub async fn delete_note(
    State(state): State<AppState>,
    Path(note_id): Path<i64>,
) -> AppResult<Json<DeletedResponse>> {
    let service = NoteService::new(state.db);
    let deleted_id = service.delete(note_id).await?;
    Ok(Json(DeletedResponse { deleted_id }))
}
