// src/db/warehouse_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::Warehouse};

#[derive(Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
}

impl WarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT * FROM warehouses
            WHERE is_active = TRUE
              AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR code ILIKE '%' || $1 || '%')
            ORDER BY code ASC
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(warehouses)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        code: &str,
        name: &str,
        address: Option<&str>,
        contact: Option<&str>,
        phone: Option<&str>,
        manager_id: Option<Uuid>,
    ) -> Result<Warehouse, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (code, name, address, contact, phone, manager_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(address)
        .bind(contact)
        .bind(phone)
        .bind(manager_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Código de depósito");
                }
            }
            e.into()
        })
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        address: Option<&str>,
        contact: Option<&str>,
        phone: Option<&str>,
        manager_id: Option<Uuid>,
        is_active: Option<bool>,
    ) -> Result<Warehouse, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses SET
                name       = COALESCE($2, name),
                address    = COALESCE($3, address),
                contact    = COALESCE($4, contact),
                phone      = COALESCE($5, phone),
                manager_id = COALESCE($6, manager_id),
                is_active  = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(contact)
        .bind(phone)
        .bind(manager_id)
        .bind(is_active)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Depósito"))?;

        Ok(warehouse)
    }
}
