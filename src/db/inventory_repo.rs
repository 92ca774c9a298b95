// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{InventoryDetail, InventoryMovement, InventoryRecord, MovementType},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn list(
        &self,
        search: Option<&str>,
        warehouse_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<InventoryDetail>, i64), AppError> {
        let records = sqlx::query_as::<_, InventoryDetail>(
            r#"
            SELECT i.*, p.name AS product_name, p.sku AS product_sku, w.name AS warehouse_name
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = i.warehouse_id
            WHERE ($1::text IS NULL
                   OR p.name ILIKE '%' || $1 || '%'
                   OR p.sku ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR i.warehouse_id = $2)
            ORDER BY i.updated_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(warehouse_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            WHERE ($1::text IS NULL
                   OR p.name ILIKE '%' || $1 || '%'
                   OR p.sku ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR i.warehouse_id = $2)
            "#,
        )
        .bind(search)
        .bind(warehouse_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((records, total))
    }

    // ---
    // Escritas (transacionais)
    // ---

    /// Aplica o delta assinado no saldo do par (produto, depósito).
    /// Query "UPSERT": cria o registro zerado na primeira movimentação e
    /// soma o delta de forma atômica — sem janela de leitura-escrita.
    pub async fn apply_delta<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        warehouse_id: Uuid,
        delta: i32,
    ) -> Result<InventoryRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            INSERT INTO inventory (product_id, warehouse_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (product_id, warehouse_id)
            DO UPDATE SET
                quantity   = inventory.quantity + $3,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(warehouse_id)
        .bind(delta)
        .fetch_one(executor)
        .await?;

        Ok(record)
    }

    /// Registra uma movimentação no livro-razão. Exatamente uma linha por
    /// delta aplicado, com o mesmo valor assinado.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        inventory_id: Uuid,
        warehouse_id: Uuid,
        movement_type: MovementType,
        quantity: i32,
        operator_id: Uuid,
        note: Option<&str>,
    ) -> Result<InventoryMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, InventoryMovement>(
            r#"
            INSERT INTO inventory_movements (
                inventory_id, warehouse_id, movement_type, quantity, operator_id, note
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(inventory_id)
        .bind(warehouse_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(operator_id)
        .bind(note)
        .fetch_one(executor)
        .await?;

        Ok(movement)
    }

    /// Busca com trava de linha, para a exclusão checar o saldo sem corrida.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InventoryRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record =
            sqlx::query_as::<_, InventoryRecord>("SELECT * FROM inventory WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(record)
    }

    /// Atualiza somente os metadados do registro — nunca a quantidade.
    pub async fn update_meta<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        reorder_point: Option<i32>,
        safety_stock: Option<i32>,
        location: Option<&str>,
    ) -> Result<InventoryRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            UPDATE inventory SET
                reorder_point = COALESCE($2, reorder_point),
                safety_stock  = COALESCE($3, safety_stock),
                location      = COALESCE($4, location),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reorder_point)
        .bind(safety_stock)
        .bind(location)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Registro de estoque"))?;

        Ok(record)
    }

    /// Remove o registro. As movimentações vão junto (ON DELETE CASCADE);
    /// a pré-condição de saldo zero é checada no service, sob trava.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
