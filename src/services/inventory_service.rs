// src/services/inventory_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{InventoryDetail, InventoryRecord, MovementType},
};

/// Pré-condição da exclusão, isolada para ser testável sem banco.
pub fn ensure_zero_stock(quantity: i32) -> Result<(), AppError> {
    if quantity != 0 {
        return Err(AppError::NonZeroStock);
    }
    Ok(())
}

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self {
            inventory_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        warehouse_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<InventoryDetail>, i64), AppError> {
        self.inventory_repo
            .list(search, warehouse_id, limit, offset)
            .await
    }

    /// Ajuste de estoque: aplica o delta assinado no saldo do par
    /// (produto, depósito) e grava a movimentação correspondente.
    ///
    /// As duas escritas acontecem na MESMA transação: saldo e livro-razão
    /// não podem divergir, nem em falha parcial.
    pub async fn adjust(
        &self,
        product_id: Uuid,
        warehouse_id: Uuid,
        movement_type: MovementType,
        quantity: i32,
        operator_id: Uuid,
        note: Option<&str>,
    ) -> Result<InventoryRecord, AppError> {
        let delta = movement_type.signed_delta(quantity);

        let mut tx = self.pool.begin().await?;

        // 1. Saldo (UPSERT atômico: cria zerado na primeira vez e soma o delta)
        let record = self
            .inventory_repo
            .apply_delta(&mut *tx, product_id, warehouse_id, delta)
            .await?;

        // 2. Livro-razão, com o MESMO delta assinado
        self.inventory_repo
            .record_movement(
                &mut *tx,
                record.id,
                warehouse_id,
                movement_type,
                delta,
                operator_id,
                note,
            )
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Atualiza apenas metadados (ponto de ressuprimento, estoque de
    /// segurança, endereço físico). Quantidade nunca passa por aqui.
    pub async fn update_meta(
        &self,
        id: Uuid,
        reorder_point: Option<i32>,
        safety_stock: Option<i32>,
        location: Option<&str>,
    ) -> Result<InventoryRecord, AppError> {
        self.inventory_repo
            .update_meta(&self.pool, id, reorder_point, safety_stock, location)
            .await
    }

    /// Exclui um registro de estoque. Só com saldo exatamente zero; a
    /// checagem roda sob trava de linha para não correr com um ajuste.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let record = self
            .inventory_repo
            .find_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Registro de estoque"))?;

        ensure_zero_stock(record.quantity)?;

        self.inventory_repo.delete(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saldo_zero_libera_exclusao() {
        assert!(ensure_zero_stock(0).is_ok());
    }

    #[test]
    fn saldo_diferente_de_zero_bloqueia_exclusao() {
        assert!(matches!(ensure_zero_stock(30), Err(AppError::NonZeroStock)));
        assert!(matches!(ensure_zero_stock(-1), Err(AppError::NonZeroStock)));
    }
}
