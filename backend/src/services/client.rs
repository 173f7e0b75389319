//! Client master data service

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{is_unique_violation, AppError, AppResult};
use shared::{validation::validate_name, CreatePartyInput};

/// Service owning client reads, writes and the deletion guard.
#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

/// Client record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

impl ClientService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all clients ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>("SELECT id, name FROM clients ORDER BY name")
            .fetch_all(&self.db)
            .await?;

        Ok(clients)
    }

    /// Create a client with a unique, non-empty name.
    pub async fn create(&self, input: CreatePartyInput) -> AppResult<Client> {
        let name = input.name.trim().to_string();
        validate_name(&name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;

        let client =
            sqlx::query_as::<_, Client>("INSERT INTO clients (name) VALUES ($1) RETURNING id, name")
                .bind(&name)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e, "clients_name_key") {
                        AppError::DuplicateEntry("name".to_string())
                    } else {
                        e.into()
                    }
                })?;

        tracing::info!(client_id = client.id, "Client created");
        Ok(client)
    }

    /// Delete a client unless notes still reference it. Check and delete
    /// run inside one transaction.
    pub async fn delete(&self, client_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                .bind(client_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound("Client".to_string()));
        }

        let has_notes =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM notes WHERE client_id = $1)")
                .bind(client_id)
                .fetch_one(&mut *tx)
                .await?;
        if has_notes {
            return Err(AppError::Conflict {
                resource: "Note".to_string(),
                message: "client is referenced by existing pedido notes".to_string(),
            });
        }

        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(client_id, "Client deleted");
        Ok(())
    }
}
