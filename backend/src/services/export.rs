//! Tabular export of pedido notes
//!
//! The exporter consumes the same fully-resolved note set as the listings
//! and renders one CSV row per note. Everything here is presentation; the
//! ledger semantics live in the note service.

use chrono::Datelike;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::note::NoteWithItems;
use shared::note_sequence_number;

/// One exported row.
#[derive(Debug, Serialize)]
pub struct NoteExportRow {
    pub sequence: String,
    pub date: String,
    pub movement: String,
    pub products: String,
    pub destination: String,
    pub reference: String,
}

pub struct ExportService;

impl ExportService {
    /// Build export rows from resolved notes.
    pub fn rows(notes: &[NoteWithItems]) -> Vec<NoteExportRow> {
        notes
            .iter()
            .map(|note| NoteExportRow {
                sequence: note_sequence_number(note.date.year(), note.id),
                date: note.date.format("%d/%m/%Y %H:%M").to_string(),
                movement: note.movement_type.label().to_string(),
                products: if note.items.is_empty() {
                    "-".to_string()
                } else {
                    note.items
                        .iter()
                        .map(|item| format!("{} (x{})", item.product_name, item.quantity))
                        .collect::<Vec<_>>()
                        .join("; ")
                },
                destination: match (&note.supplier, &note.client) {
                    (Some(supplier), _) => format!("Proveedor: {}", supplier.name),
                    (None, Some(client)) => format!("Cliente: {}", client.name),
                    _ => "-".to_string(),
                },
                reference: note
                    .reference_text
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect()
    }

    /// Serialize rows to CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for row in data {
            wtr.serialize(row)
                .map_err(|e| AppError::Internal(format!("CSV serialization failed: {}", e)))?;
        }

        let csv_data = String::from_utf8(wtr.into_inner().map_err(|e| {
            AppError::Internal(format!("CSV writer error: {}", e))
        })?)
        .map_err(|e| AppError::Internal(format!("CSV encoding error: {}", e)))?;

        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shared::{MovementType, PartySummary};

    use crate::services::note::NoteItemDetail;

    fn sample_note() -> NoteWithItems {
        NoteWithItems {
            id: 7,
            date: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            movement_type: MovementType::Outbound,
            reference_text: Some("OV-1881".to_string()),
            supplier: None,
            client: Some(PartySummary {
                id: 3,
                name: "Distribuidora Sur".to_string(),
            }),
            items: vec![
                NoteItemDetail {
                    product_id: 1,
                    product_name: "Tornillo".to_string(),
                    quantity: 5,
                    unit_price: Decimal::new(250, 2),
                    subtotal: Decimal::new(1250, 2),
                },
                NoteItemDetail {
                    product_id: 2,
                    product_name: "Tuerca".to_string(),
                    quantity: 12,
                    unit_price: Decimal::new(90, 2),
                    subtotal: Decimal::new(1080, 2),
                },
            ],
        }
    }

    #[test]
    fn rows_format_sequence_date_and_items() {
        let rows = ExportService::rows(&[sample_note()]);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.sequence, "N2026_0007");
        assert_eq!(row.date, "14/03/2026 09:30");
        assert_eq!(row.movement, "Salida");
        assert_eq!(row.products, "Tornillo (x5); Tuerca (x12)");
        assert_eq!(row.destination, "Cliente: Distribuidora Sur");
        assert_eq!(row.reference, "OV-1881");
    }

    #[test]
    fn rows_use_placeholders_when_empty() {
        let mut note = sample_note();
        note.items.clear();
        note.client = None;
        note.reference_text = None;

        let row = &ExportService::rows(&[note])[0];
        assert_eq!(row.products, "-");
        assert_eq!(row.destination, "-");
        assert_eq!(row.reference, "-");
    }

    #[test]
    fn csv_has_header_and_one_line_per_note() {
        let rows = ExportService::rows(&[sample_note()]);
        let csv = ExportService::export_to_csv(&rows).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "sequence,date,movement,products,destination,reference"
        );
        assert_eq!(lines.count(), 1);
    }
}
