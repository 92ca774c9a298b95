// src/services/supplier_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::SupplierRepository, models::suppliers::Supplier};

#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: SupplierRepository,
    pool: PgPool,
}

impl SupplierService {
    pub fn new(supplier_repo: SupplierRepository, pool: PgPool) -> Self {
        Self {
            supplier_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Supplier>, i64), AppError> {
        self.supplier_repo.list(search, limit, offset).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        contact_person: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        tax_number: Option<&str>,
        bank_account: Option<&str>,
        lead_time: i32,
        min_order_qty: i32,
    ) -> Result<Supplier, AppError> {
        self.supplier_repo
            .create(
                &self.pool,
                code,
                name,
                contact_person,
                email,
                phone,
                address,
                tax_number,
                bank_account,
                lead_time,
                min_order_qty,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        contact_person: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        tax_number: Option<&str>,
        bank_account: Option<&str>,
        lead_time: Option<i32>,
        min_order_qty: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Supplier, AppError> {
        self.supplier_repo
            .update(
                &self.pool,
                id,
                name,
                contact_person,
                email,
                phone,
                address,
                tax_number,
                bank_account,
                lead_time,
                min_order_qty,
                is_active,
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.supplier_repo.delete(&self.pool, id).await
    }
}
