//! HTTP handler for the note export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::{ExportService, NoteService};
use crate::AppState;
use shared::DateRange;

/// Query parameters for the export: either an explicit id list or the same
/// filters as the note listing. With neither, everything is exported.
#[derive(Debug, Deserialize)]
pub struct ExportNotesQuery {
    pub ids: Option<String>,
    pub q: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Export the selected notes as CSV
pub async fn export_notes(
    State(state): State<AppState>,
    Query(query): Query<ExportNotesQuery>,
) -> AppResult<impl IntoResponse> {
    let service = NoteService::new(state.db);

    let notes = match parse_id_list(query.ids.as_deref())? {
        Some(ids) => service.list_by_ids(&ids).await?,
        None => {
            let range = DateRange {
                start_date: query.start_date,
                end_date: query.end_date,
            };
            service.list(query.q.as_deref(), range).await?
        }
    };

    let rows = ExportService::rows(&notes);
    let csv = ExportService::export_to_csv(&rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"pedido_notes.csv\"",
            ),
        ],
        csv,
    ))
}

/// Parses a comma-separated id list; an empty parameter means "no filter".
fn parse_id_list(raw: Option<&str>) -> AppResult<Option<Vec<i64>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(|_| AppError::Validation {
            field: "ids".to_string(),
            message: "ids must be a comma-separated list of integers".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_parses_and_trims() {
        assert_eq!(parse_id_list(Some("1, 2,3")).unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(parse_id_list(Some("  ")).unwrap(), None);
        assert_eq!(parse_id_list(None).unwrap(), None);
    }

    #[test]
    fn id_list_rejects_garbage() {
        assert!(parse_id_list(Some("1,x")).is_err());
    }
}
