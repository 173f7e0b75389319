//! Pedido note service: the atomic note+items transaction manager and the
//! filtered ledger queries.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use shared::{
    validation::{validate_note_counterparty, validate_note_items},
    CreateNoteInput, DateRange, MovementType, PartySummary,
};

/// Service owning note creation, deletion and the ledger queries.
#[derive(Clone)]
pub struct NoteService {
    db: PgPool,
}

/// Confirmation returned after an atomic note creation.
#[derive(Debug, Serialize)]
pub struct CreatedNote {
    pub note_id: i64,
    pub item_product_ids: Vec<i64>,
}

/// Fully resolved note as returned by listings and consumed by the exporter.
#[derive(Debug, Serialize)]
pub struct NoteWithItems {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub movement_type: MovementType,
    pub reference_text: Option<String>,
    pub supplier: Option<PartySummary>,
    pub client: Option<PartySummary>,
    pub items: Vec<NoteItemDetail>,
}

/// One resolved product line. The subtotal is derived, never stored.
#[derive(Debug, Serialize)]
pub struct NoteItemDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Header row with resolved counterparty names.
#[derive(Debug, FromRow)]
struct NoteHeaderRow {
    id: i64,
    date: DateTime<Utc>,
    movement_type: String,
    reference_text: Option<String>,
    supplier_id: Option<i64>,
    supplier_name: Option<String>,
    client_id: Option<i64>,
    client_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct NoteItemRow {
    note_id: i64,
    product_id: i64,
    product_name: String,
    quantity: i64,
    price: Decimal,
}

const NOTE_HEADER_SELECT: &str = r#"
    SELECT n.id, n.date, n.movement_type, n.reference_text,
           n.supplier_id, s.name AS supplier_name,
           n.client_id, c.name AS client_name
    FROM notes n
    LEFT JOIN suppliers s ON s.id = n.supplier_id
    LEFT JOIN clients c ON c.id = n.client_id
"#;

impl NoteService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a note together with its items as one atomic unit.
    ///
    /// All validation and reference resolution happens before the inserts,
    /// inside the same transaction; any failure leaves no partial note or
    /// items behind.
    pub async fn create(&self, input: CreateNoteInput) -> AppResult<CreatedNote> {
        let movement =
            MovementType::parse(&input.movement_type).ok_or_else(|| AppError::Validation {
                field: "movement_type".to_string(),
                message: "movement_type must be Entrada or Salida".to_string(),
            })?;

        validate_note_counterparty(movement, input.supplier_id, input.client_id).map_err(
            |message| AppError::Validation {
                field: match movement {
                    MovementType::Inbound => "supplier_id".to_string(),
                    MovementType::Outbound => "client_id".to_string(),
                },
                message: message.to_string(),
            },
        )?;

        validate_note_items(&input.items).map_err(|message| AppError::Validation {
            field: "items".to_string(),
            message: message.to_string(),
        })?;

        let reference_text = input
            .reference_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);

        let mut tx = self.db.begin().await?;

        if let Some(supplier_id) = input.supplier_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
            )
            .bind(supplier_id)
            .fetch_one(&mut *tx)
            .await?;
            if !exists {
                return Err(AppError::InvalidReference(format!(
                    "Supplier {}",
                    supplier_id
                )));
            }
        }

        if let Some(client_id) = input.client_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                    .bind(client_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists {
                return Err(AppError::InvalidReference(format!("Client {}", client_id)));
            }
        }

        for item in &input.items {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)",
            )
            .bind(item.product_id)
            .fetch_one(&mut *tx)
            .await?;
            if !exists {
                return Err(AppError::InvalidReference(format!(
                    "Product {}",
                    item.product_id
                )));
            }
        }

        let note_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO notes (movement_type, supplier_id, client_id, reference_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(movement.as_str())
        .bind(input.supplier_id)
        .bind(input.client_id)
        .bind(&reference_text)
        .fetch_one(&mut *tx)
        .await?;

        let mut item_product_ids = Vec::with_capacity(input.items.len());
        for item in &input.items {
            sqlx::query("INSERT INTO note_items (note_id, product_id, quantity) VALUES ($1, $2, $3)")
                .bind(note_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
            item_product_ids.push(item.product_id);
        }

        tx.commit().await?;

        tracing::info!(
            note_id,
            movement = movement.as_str(),
            items = item_product_ids.len(),
            "Note created"
        );
        Ok(CreatedNote {
            note_id,
            item_product_ids,
        })
    }

    /// Delete a note; its items go with it (cascade). Stock needs no
    /// explicit rollback because every read recomputes it from the
    /// surviving ledger.
    pub async fn delete(&self, note_id: i64) -> AppResult<i64> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(note_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Note".to_string()));
        }

        tx.commit().await?;

        tracing::info!(note_id, "Note deleted");
        Ok(note_id)
    }

    /// List notes newest first, optionally filtered by a substring query
    /// (item product names, reference text, supplier/client name) and an
    /// inclusive date range.
    pub async fn list(&self, query: Option<&str>, range: DateRange) -> AppResult<Vec<NoteWithItems>> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));
        let (start, end) = range.bounds();

        let sql = format!(
            r#"
            {NOTE_HEADER_SELECT}
            WHERE ($1::text IS NULL
                   OR n.reference_text ILIKE $1
                   OR s.name ILIKE $1
                   OR c.name ILIKE $1
                   OR EXISTS (
                       SELECT 1 FROM note_items ni
                       JOIN products p ON p.id = ni.product_id
                       WHERE ni.note_id = n.id AND p.name ILIKE $1))
              AND ($2::timestamptz IS NULL OR n.date >= $2)
              AND ($3::timestamptz IS NULL OR n.date < $3)
            ORDER BY n.date DESC, n.id DESC
            "#
        );
        let headers = sqlx::query_as::<_, NoteHeaderRow>(&sql)
            .bind(&pattern)
            .bind(start)
            .bind(end)
            .fetch_all(&self.db)
            .await?;

        self.attach_items(headers).await
    }

    /// Resolve an explicit set of notes, newest first. Used by the export.
    pub async fn list_by_ids(&self, ids: &[i64]) -> AppResult<Vec<NoteWithItems>> {
        let sql = format!("{NOTE_HEADER_SELECT} WHERE n.id = ANY($1) ORDER BY n.date DESC, n.id DESC");
        let headers = sqlx::query_as::<_, NoteHeaderRow>(&sql)
            .bind(ids)
            .fetch_all(&self.db)
            .await?;

        self.attach_items(headers).await
    }

    async fn attach_items(&self, headers: Vec<NoteHeaderRow>) -> AppResult<Vec<NoteWithItems>> {
        let note_ids: Vec<i64> = headers.iter().map(|h| h.id).collect();

        let item_rows = if note_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, NoteItemRow>(
                r#"
                SELECT ni.note_id, ni.product_id, p.name AS product_name, ni.quantity, p.price
                FROM note_items ni
                JOIN products p ON p.id = ni.product_id
                WHERE ni.note_id = ANY($1)
                ORDER BY ni.id
                "#,
            )
            .bind(&note_ids)
            .fetch_all(&self.db)
            .await?
        };

        let mut items_by_note: HashMap<i64, Vec<NoteItemDetail>> = HashMap::new();
        for row in item_rows {
            items_by_note
                .entry(row.note_id)
                .or_default()
                .push(NoteItemDetail {
                    product_id: row.product_id,
                    product_name: row.product_name,
                    quantity: row.quantity,
                    unit_price: row.price,
                    subtotal: row.price * Decimal::from(row.quantity),
                });
        }

        headers
            .into_iter()
            .map(|header| {
                let movement_type =
                    MovementType::parse(&header.movement_type).ok_or_else(|| {
                        AppError::Internal(format!(
                            "unknown movement type in ledger: {}",
                            header.movement_type
                        ))
                    })?;

                Ok(NoteWithItems {
                    id: header.id,
                    date: header.date,
                    movement_type,
                    reference_text: header.reference_text,
                    supplier: party_summary(header.supplier_id, header.supplier_name),
                    client: party_summary(header.client_id, header.client_name),
                    items: items_by_note.remove(&header.id).unwrap_or_default(),
                })
            })
            .collect()
    }
}

fn party_summary(id: Option<i64>, name: Option<String>) -> Option<PartySummary> {
    match (id, name) {
        (Some(id), Some(name)) => Some(PartySummary { id, name }),
        _ => None,
    }
}
