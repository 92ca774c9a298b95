// src/db/supplier_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::suppliers::Supplier};

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Supplier>, i64), AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT * FROM suppliers
            WHERE is_active = TRUE
              AND ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR code ILIKE '%' || $1 || '%'
                   OR contact_person ILIKE '%' || $1 || '%'
                   OR phone ILIKE '%' || $1 || '%')
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM suppliers
            WHERE is_active = TRUE
              AND ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR code ILIKE '%' || $1 || '%'
                   OR contact_person ILIKE '%' || $1 || '%'
                   OR phone ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok((suppliers, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
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
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (
                code, name, contact_person, email, phone, address,
                tax_number, bank_account, lead_time, min_order_qty
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(contact_person)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(tax_number)
        .bind(bank_account)
        .bind(lead_time)
        .bind(min_order_qty)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Código de fornecedor");
                }
            }
            e.into()
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
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
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers SET
                name           = COALESCE($2, name),
                contact_person = COALESCE($3, contact_person),
                email          = COALESCE($4, email),
                phone          = COALESCE($5, phone),
                address        = COALESCE($6, address),
                tax_number     = COALESCE($7, tax_number),
                bank_account   = COALESCE($8, bank_account),
                lead_time      = COALESCE($9, lead_time),
                min_order_qty  = COALESCE($10, min_order_qty),
                is_active      = COALESCE($11, is_active),
                updated_at     = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(contact_person)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(tax_number)
        .bind(bank_account)
        .bind(lead_time)
        .bind(min_order_qty)
        .bind(is_active)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Fornecedor"))?;

        Ok(supplier)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fornecedor"));
        }
        Ok(())
    }
}
