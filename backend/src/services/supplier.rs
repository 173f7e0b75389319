//! Supplier master data service

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{is_unique_violation, AppError, AppResult};
use shared::{validation::validate_name, CreatePartyInput};

/// Service owning supplier reads, writes and the deletion guard.
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Supplier record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all suppliers ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Supplier>> {
        let suppliers =
            sqlx::query_as::<_, Supplier>("SELECT id, name FROM suppliers ORDER BY name")
                .fetch_all(&self.db)
                .await?;

        Ok(suppliers)
    }

    /// Create a supplier with a unique, non-empty name.
    pub async fn create(&self, input: CreatePartyInput) -> AppResult<Supplier> {
        let name = input.name.trim().to_string();
        validate_name(&name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;

        let supplier = sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, "suppliers_name_key") {
                AppError::DuplicateEntry("name".to_string())
            } else {
                e.into()
            }
        })?;

        tracing::info!(supplier_id = supplier.id, "Supplier created");
        Ok(supplier)
    }

    /// Delete a supplier unless products or notes still reference it.
    ///
    /// The reference checks and the delete run inside one transaction so a
    /// reference created concurrently cannot slip between check and act.
    pub async fn delete(&self, supplier_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(supplier_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let has_products = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE supplier_id = $1)",
        )
        .bind(supplier_id)
        .fetch_one(&mut *tx)
        .await?;
        if has_products {
            return Err(AppError::Conflict {
                resource: "Product".to_string(),
                message: "supplier is referenced by existing products".to_string(),
            });
        }

        let has_notes = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE supplier_id = $1)",
        )
        .bind(supplier_id)
        .fetch_one(&mut *tx)
        .await?;
        if has_notes {
            return Err(AppError::Conflict {
                resource: "Note".to_string(),
                message: "supplier is referenced by existing pedido notes".to_string(),
            });
        }

        sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(supplier_id, "Supplier deleted");
        Ok(())
    }
}
