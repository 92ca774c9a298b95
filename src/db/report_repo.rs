// src/db/report_repo.rs
//
// Queries de agregação dos relatórios. Só leitura, sempre na pool.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::inventory::{InventoryDetail, MovementDetail},
    models::reports::{DailySales, InventoryStatusSummary, StatusBreakdown, TopProduct},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  VENDAS (pedidos CANCELLED ficam sempre de fora)
    // =========================================================================

    pub async fn sales_totals(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(i64, rust_decimal::Decimal), AppError> {
        let row = sqlx::query_as::<_, (i64, rust_decimal::Decimal)>(
            r#"
            SELECT COUNT(*), COALESCE(SUM(final_amount), 0)
            FROM orders
            WHERE status <> 'CANCELLED'
              AND ($1::timestamptz IS NULL OR order_date >= $1)
              AND ($2::timestamptz IS NULL OR order_date <= $2)
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn sales_by_status(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<StatusBreakdown>, AppError> {
        let rows = sqlx::query_as::<_, StatusBreakdown>(
            r#"
            SELECT status,
                   COUNT(*) AS order_count,
                   COALESCE(SUM(total_amount), 0) AS total_amount,
                   COALESCE(SUM(final_amount), 0) AS final_amount
            FROM orders
            WHERE status <> 'CANCELLED'
              AND ($1::timestamptz IS NULL OR order_date >= $1)
              AND ($2::timestamptz IS NULL OR order_date <= $2)
            GROUP BY status
            ORDER BY status
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn sales_daily(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DailySales>, AppError> {
        let rows = sqlx::query_as::<_, DailySales>(
            r#"
            SELECT order_date::date AS date,
                   COUNT(*) AS order_count,
                   COALESCE(SUM(final_amount), 0) AS revenue
            FROM orders
            WHERE status <> 'CANCELLED'
              AND order_date >= $1 AND order_date <= $2
            GROUP BY order_date::date
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn top_products(&self, limit: i64) -> Result<Vec<TopProduct>, AppError> {
        let rows = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT oi.product_id,
                   p.name AS product_name,
                   p.sku AS product_sku,
                   SUM(oi.quantity) AS total_quantity,
                   COALESCE(SUM(oi.amount), 0) AS total_amount
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            JOIN orders o ON o.id = oi.order_id
            WHERE o.status <> 'CANCELLED'
            GROUP BY oi.product_id, p.name, p.sku
            ORDER BY total_amount DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // =========================================================================
    //  ESTOQUE
    // =========================================================================

    pub async fn inventory_summary(&self) -> Result<InventoryStatusSummary, AppError> {
        let summary = sqlx::query_as::<_, InventoryStatusSummary>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE i.quantity = 0) AS zero,
                   COUNT(*) FILTER (WHERE i.quantity > 0 AND i.quantity <= i.safety_stock) AS low,
                   COUNT(*) FILTER (WHERE i.quantity > i.safety_stock) AS normal,
                   COALESCE(SUM(i.quantity * p.cost_price), 0) AS total_value
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    /// Registros ordenados do menor saldo para o maior (os críticos primeiro).
    pub async fn inventory_details(&self) -> Result<Vec<InventoryDetail>, AppError> {
        let rows = sqlx::query_as::<_, InventoryDetail>(
            r#"
            SELECT i.*, p.name AS product_name, p.sku AS product_sku, w.name AS warehouse_name
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = i.warehouse_id
            ORDER BY i.quantity ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn latest_movements(&self, limit: i64) -> Result<Vec<MovementDetail>, AppError> {
        let rows = sqlx::query_as::<_, MovementDetail>(
            r#"
            SELECT m.*,
                   p.name AS product_name,
                   p.sku AS product_sku,
                   w.name AS warehouse_name,
                   u.name AS operator_name
            FROM inventory_movements m
            JOIN inventory i ON i.id = m.inventory_id
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = m.warehouse_id
            JOIN users u ON u.id = m.operator_id
            ORDER BY m.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
