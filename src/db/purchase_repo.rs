// src/db/purchase_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::purchases::{Purchase, PurchaseItem, PurchaseStatus, PurchaseSummary},
};

#[derive(Clone)]
pub struct PurchaseRepository {
    pool: PgPool,
}

impl PurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<PurchaseStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PurchaseSummary>, i64), AppError> {
        let purchases = sqlx::query_as::<_, PurchaseSummary>(
            r#"
            SELECT p.*, s.name AS supplier_name, u.name AS purchaser_name
            FROM purchases p
            JOIN suppliers s ON s.id = p.supplier_id
            LEFT JOIN users u ON u.id = p.purchaser_id
            WHERE ($1::text IS NULL
                   OR p.purchase_number ILIKE '%' || $1 || '%'
                   OR s.name ILIKE '%' || $1 || '%')
              AND ($2::purchase_status IS NULL OR p.status = $2)
            ORDER BY p.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM purchases p
            JOIN suppliers s ON s.id = p.supplier_id
            WHERE ($1::text IS NULL
                   OR p.purchase_number ILIKE '%' || $1 || '%'
                   OR s.name ILIKE '%' || $1 || '%')
              AND ($2::purchase_status IS NULL OR p.status = $2)
            "#,
        )
        .bind(search)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok((purchases, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Purchase>, AppError> {
        let purchase = sqlx::query_as::<_, Purchase>("SELECT * FROM purchases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(purchase)
    }

    pub async fn supplier_name(&self, supplier_id: Uuid) -> Result<String, AppError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM suppliers WHERE id = $1")
            .bind(supplier_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Fornecedor"))?;
        Ok(name)
    }

    pub async fn list_items(&self, purchase_id: Uuid) -> Result<Vec<PurchaseItem>, AppError> {
        let items = sqlx::query_as::<_, PurchaseItem>(
            "SELECT * FROM purchase_items WHERE purchase_id = $1",
        )
        .bind(purchase_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_purchase<'e, E>(
        &self,
        executor: E,
        purchase_number: &str,
        supplier_id: Uuid,
        total_amount: Decimal,
        tax_amount: Decimal,
        final_amount: Decimal,
        expected_date: Option<DateTime<Utc>>,
        warehouse_id: Option<Uuid>,
        note: Option<&str>,
        purchaser_id: Option<Uuid>,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (
                purchase_number, supplier_id, total_amount, tax_amount, final_amount,
                expected_date, warehouse_id, note, purchaser_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(purchase_number)
        .bind(supplier_id)
        .bind(total_amount)
        .bind(tax_amount)
        .bind(final_amount)
        .bind(expected_date)
        .bind(warehouse_id)
        .bind(note)
        .bind(purchaser_id)
        .fetch_one(executor)
        .await?;

        Ok(purchase)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        purchase_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        tax_rate: Decimal,
        amount: Decimal,
        note: Option<&str>,
    ) -> Result<PurchaseItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, PurchaseItem>(
            r#"
            INSERT INTO purchase_items (
                purchase_id, product_id, quantity, unit_price, tax_rate, amount, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(purchase_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(tax_rate)
        .bind(amount)
        .bind(note)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    pub async fn update_header<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: Option<PurchaseStatus>,
        expected_date: Option<DateTime<Utc>>,
        received_date: Option<DateTime<Utc>>,
        warehouse_id: Option<Uuid>,
        note: Option<&str>,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            UPDATE purchases SET
                status        = COALESCE($2, status),
                expected_date = COALESCE($3, expected_date),
                received_date = COALESCE($4, received_date),
                warehouse_id  = COALESCE($5, warehouse_id),
                note          = COALESCE($6, note),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(expected_date)
        .bind(received_date)
        .bind(warehouse_id)
        .bind(note)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Ordem de compra"))?;

        Ok(purchase)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ordem de compra"));
        }
        Ok(())
    }
}
