// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{Order, OrderItem, OrderStatus, OrderSummary},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<OrderSummary>, i64), AppError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.*, c.name AS customer_name, u.name AS sales_person_name
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            LEFT JOIN users u ON u.id = o.sales_person_id
            WHERE ($1::text IS NULL
                   OR o.order_number ILIKE '%' || $1 || '%'
                   OR c.name ILIKE '%' || $1 || '%')
              AND ($2::order_status IS NULL OR o.status = $2)
            ORDER BY o.created_at DESC
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
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE ($1::text IS NULL
                   OR o.order_number ILIKE '%' || $1 || '%'
                   OR c.name ILIKE '%' || $1 || '%')
              AND ($2::order_status IS NULL OR o.status = $2)
            "#,
        )
        .bind(search)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok((orders, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn customer_name(&self, customer_id: Uuid) -> Result<String, AppError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM customers WHERE id = $1")
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;
        Ok(name)
    }

    pub async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items =
            sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    // ---
    // Escritas (transacionais)
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        order_number: &str,
        customer_id: Uuid,
        total_amount: Decimal,
        discount: Decimal,
        tax_rate: Decimal,
        tax_amount: Decimal,
        final_amount: Decimal,
        delivery_date: Option<DateTime<Utc>>,
        delivery_address: Option<&str>,
        note: Option<&str>,
        sales_person_id: Option<Uuid>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                order_number, customer_id, total_amount, discount, tax_rate,
                tax_amount, final_amount, delivery_date, delivery_address,
                note, sales_person_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(order_number)
        .bind(customer_id)
        .bind(total_amount)
        .bind(discount)
        .bind(tax_rate)
        .bind(tax_amount)
        .bind(final_amount)
        .bind(delivery_date)
        .bind(delivery_address)
        .bind(note)
        .bind(sales_person_id)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        discount: Decimal,
        tax_rate: Decimal,
        amount: Decimal,
        note: Option<&str>,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (
                order_id, product_id, quantity, unit_price, discount, tax_rate, amount, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(discount)
        .bind(tax_rate)
        .bind(amount)
        .bind(note)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    /// Atualiza o cabeçalho. Status pode ser escrito livremente; os campos
    /// de conteúdo já passaram pelo gate de DRAFT no service.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_header<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: Option<OrderStatus>,
        delivery_date: Option<DateTime<Utc>>,
        delivery_address: Option<&str>,
        note: Option<&str>,
        discount: Option<Decimal>,
        tax_amount: Option<Decimal>,
        final_amount: Option<Decimal>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET
                status           = COALESCE($2, status),
                delivery_date    = COALESCE($3, delivery_date),
                delivery_address = COALESCE($4, delivery_address),
                note             = COALESCE($5, note),
                discount         = COALESCE($6, discount),
                tax_amount       = COALESCE($7, tax_amount),
                final_amount     = COALESCE($8, final_amount),
                updated_at       = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(delivery_date)
        .bind(delivery_address)
        .bind(note)
        .bind(discount)
        .bind(tax_amount)
        .bind(final_amount)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Pedido"))?;

        Ok(order)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Os itens caem por ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pedido"));
        }
        Ok(())
    }
}
