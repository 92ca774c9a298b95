// src/services/warehouse_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::WarehouseRepository, models::inventory::Warehouse};

#[derive(Clone)]
pub struct WarehouseService {
    warehouse_repo: WarehouseRepository,
    pool: PgPool,
}

impl WarehouseService {
    pub fn new(warehouse_repo: WarehouseRepository, pool: PgPool) -> Self {
        Self {
            warehouse_repo,
            pool,
        }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Warehouse>, AppError> {
        self.warehouse_repo.list(search).await
    }

    pub async fn create(
        &self,
        code: &str,
        name: &str,
        address: Option<&str>,
        contact: Option<&str>,
        phone: Option<&str>,
        manager_id: Option<Uuid>,
    ) -> Result<Warehouse, AppError> {
        self.warehouse_repo
            .create(&self.pool, code, name, address, contact, phone, manager_id)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        address: Option<&str>,
        contact: Option<&str>,
        phone: Option<&str>,
        manager_id: Option<Uuid>,
        is_active: Option<bool>,
    ) -> Result<Warehouse, AppError> {
        self.warehouse_repo
            .update(
                &self.pool,
                id,
                name,
                address,
                contact,
                phone,
                manager_id,
                is_active,
            )
            .await
    }
}
