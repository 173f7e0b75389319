//! Product catalog service: listings with derived stock, code-generating
//! creation, edits and the deletion guard.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{is_unique_violation, AppError, AppResult};
use shared::{
    models::product::{code_stem, format_product_code},
    validation::validate_name,
    AcquisitionMode, CreateProductInput, Page, PageParams, Unit, UpdateProductInput,
};

/// Attempts before a code collision is reported as a conflict. Two
/// concurrent creations sharing a prefix+abbreviation can compute the same
/// sequence number; re-counting after the unique violation resolves it.
const CODE_RETRY_ATTEMPTS: u32 = 3;

/// The LEFT JOIN aggregate computing stock from the ledger. Stock is never
/// persisted; it is recomputed from the full item history on every read.
const STOCK_SELECT: &str = r#"
    SELECT p.id, p.name, p.code, p.unit, p.acquisition_mode, p.price, p.weight,
           p.supplier_id, s.name AS supplier_name,
           COALESCE(SUM(CASE WHEN n.movement_type = 'inbound' THEN ni.quantity
                             WHEN n.movement_type = 'outbound' THEN -ni.quantity
                             ELSE 0 END), 0)::BIGINT AS stock
    FROM products p
    JOIN suppliers s ON s.id = p.supplier_id
    LEFT JOIN note_items ni ON ni.product_id = p.id
    LEFT JOIN notes n ON n.id = ni.note_id
"#;

/// Service owning the product catalog and the stock aggregate.
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Product annotated with its supplier name and computed stock.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductWithStock {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub unit: String,
    pub acquisition_mode: String,
    pub price: Decimal,
    pub weight: Decimal,
    pub supplier_id: i64,
    pub supplier_name: String,
    pub stock: i64,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Paged product listing, each row annotated with stock. The optional
    /// query is a case-insensitive substring match over name, code and
    /// supplier name.
    pub async fn list(
        &self,
        query: Option<&str>,
        params: PageParams,
    ) -> AppResult<Page<ProductWithStock>> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q));
        let (page, page_size) = params.resolve();

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products p
            JOIN suppliers s ON s.id = p.supplier_id
            WHERE ($1::text IS NULL OR p.name ILIKE $1 OR p.code ILIKE $1 OR s.name ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.db)
        .await?;

        let sql = format!(
            r#"
            {STOCK_SELECT}
            WHERE ($1::text IS NULL OR p.name ILIKE $1 OR p.code ILIKE $1 OR s.name ILIKE $1)
            GROUP BY p.id, s.name
            ORDER BY p.name, p.id
            LIMIT $2 OFFSET $3
            "#
        );
        let results = sqlx::query_as::<_, ProductWithStock>(&sql)
            .bind(&pattern)
            .bind(i64::from(page_size))
            .bind(params.offset())
            .fetch_all(&self.db)
            .await?;

        Ok(Page {
            results,
            total,
            page,
            page_size,
        })
    }

    /// Single product with computed stock; same aggregate as the listing.
    pub async fn get(&self, product_id: i64) -> AppResult<ProductWithStock> {
        let sql = format!("{STOCK_SELECT} WHERE p.id = $1 GROUP BY p.id, s.name");
        let product = sqlx::query_as::<_, ProductWithStock>(&sql)
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// Create a product. The code is generated from the acquisition mode
    /// and the name, never accepted from the caller, and never overwritten
    /// once assigned.
    pub async fn create(&self, input: CreateProductInput) -> AppResult<ProductWithStock> {
        let name = input.name.trim().to_string();
        validate_name(&name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;

        let mode = AcquisitionMode::parse(&input.acquisition_mode).ok_or_else(|| {
            AppError::Validation {
                field: "acquisition_mode".to_string(),
                message: "acquisition_mode must be manufactured or purchased".to_string(),
            }
        })?;

        let unit = resolve_unit(input.unit.as_deref())?;
        let price = validate_amount("price", input.price.unwrap_or(Decimal::ZERO))?;
        let weight = validate_amount("weight", input.weight.unwrap_or(Decimal::ZERO))?;

        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&self.db)
                .await?;
        if !supplier_exists {
            return Err(AppError::InvalidReference(format!(
                "Supplier {}",
                input.supplier_id
            )));
        }

        let stem = code_stem(mode, &name);

        for attempt in 1..=CODE_RETRY_ATTEMPTS {
            let mut tx = self.db.begin().await?;

            let existing = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM products WHERE code LIKE $1 ESCAPE '\\'",
            )
            .bind(format!("{}%", escape_like(&stem)))
            .fetch_one(&mut *tx)
            .await?;
            let code = format_product_code(&stem, existing + 1);

            let inserted = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO products (name, code, unit, acquisition_mode, price, weight, supplier_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                "#,
            )
            .bind(&name)
            .bind(&code)
            .bind(unit.as_str())
            .bind(mode.as_str())
            .bind(price)
            .bind(weight)
            .bind(input.supplier_id)
            .fetch_one(&mut *tx)
            .await;

            match inserted {
                Ok(product_id) => {
                    tx.commit().await?;
                    tracing::info!(product_id, code = %code, "Product created");
                    return self.get(product_id).await;
                }
                Err(e) if is_unique_violation(&e, "products_code_key") => {
                    tracing::debug!(code = %code, attempt, "Product code collision, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::DuplicateEntry("code".to_string()))
    }

    /// Edit a product. All fields are required; the code may be changed but
    /// stays subject to the uniqueness check.
    pub async fn update(
        &self,
        product_id: i64,
        input: UpdateProductInput,
    ) -> AppResult<ProductWithStock> {
        let name = input.name.trim().to_string();
        validate_name(&name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;

        let code = input.code.trim().to_string();
        if code.is_empty() {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: "code is required".to_string(),
            });
        }

        let mode = AcquisitionMode::parse(&input.acquisition_mode).ok_or_else(|| {
            AppError::Validation {
                field: "acquisition_mode".to_string(),
                message: "acquisition_mode must be manufactured or purchased".to_string(),
            }
        })?;

        let unit = Unit::parse(&input.unit).ok_or_else(|| AppError::Validation {
            field: "unit".to_string(),
            message: "unknown unit".to_string(),
        })?;

        let price = validate_amount("price", input.price)?;
        let weight = validate_amount("weight", input.weight)?;

        let mut tx = self.db.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&mut *tx)
                .await?;
        if !supplier_exists {
            return Err(AppError::InvalidReference(format!(
                "Supplier {}",
                input.supplier_id
            )));
        }

        let code_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE code = $1 AND id <> $2)",
        )
        .bind(&code)
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;
        if code_taken {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        sqlx::query(
            r#"
            UPDATE products
            SET name = $1, code = $2, unit = $3, acquisition_mode = $4,
                price = $5, weight = $6, supplier_id = $7
            WHERE id = $8
            "#,
        )
        .bind(&name)
        .bind(&code)
        .bind(unit.as_str())
        .bind(mode.as_str())
        .bind(price)
        .bind(weight)
        .bind(input.supplier_id)
        .bind(product_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            // Backstop for a code claimed between the check and the update.
            if is_unique_violation(&e, "products_code_key") {
                AppError::DuplicateEntry("code".to_string())
            } else {
                e.into()
            }
        })?;

        tx.commit().await?;

        tracing::info!(product_id, "Product updated");
        self.get(product_id).await
    }

    /// Delete a product unless note items still reference it.
    ///
    /// Deleting a referenced product would silently rewrite the item sets
    /// of historical notes, so the guard forbids it outright, matching the
    /// supplier and client rules.
    pub async fn delete(&self, product_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let has_items = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM note_items WHERE product_id = $1)",
        )
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;
        if has_items {
            return Err(AppError::Conflict {
                resource: "NoteItem".to_string(),
                message: "product is referenced by existing note items".to_string(),
            });
        }

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(product_id, "Product deleted");
        Ok(())
    }
}

/// Names may contain `%`, `_` or `\`, which LIKE treats as metacharacters;
/// an unescaped stem would over-count the series and skew sequence numbers.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn resolve_unit(raw: Option<&str>) -> AppResult<Unit> {
    match raw.map(str::trim).filter(|u| !u.is_empty()) {
        Some(raw) => Unit::parse(raw).ok_or_else(|| AppError::Validation {
            field: "unit".to_string(),
            message: "unknown unit".to_string(),
        }),
        None => Ok(Unit::default()),
    }
}

/// Amounts are non-negative and stored with two fractional digits.
fn validate_amount(field: &str, value: Decimal) -> AppResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(AppError::Validation {
            field: field.to_string(),
            message: format!("{} cannot be negative", field),
        });
    }
    Ok(value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_stems_pass_through_unescaped() {
        assert_eq!(escape_like("F1TOR"), "F1TOR");
        assert_eq!(escape_like("M1XXX"), "M1XXX");
    }

    #[test]
    fn like_metacharacters_in_stems_are_escaped() {
        // a product named "%_x" yields the stem M1%_X
        assert_eq!(escape_like("M1%_X"), "M1\\%\\_X");
        assert_eq!(escape_like("F1\\AB"), "F1\\\\AB");
    }
}
