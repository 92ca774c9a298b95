// src/db/customer_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::customers::{Customer, CustomerType},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        customer_type: Option<CustomerType>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Customer>, i64), AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE is_active = TRUE
              AND ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR code ILIKE '%' || $1 || '%'
                   OR phone ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%')
              AND ($2::customer_type IS NULL OR customer_type = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(customer_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE is_active = TRUE
              AND ($1::text IS NULL
                   OR name ILIKE '%' || $1 || '%'
                   OR code ILIKE '%' || $1 || '%'
                   OR phone ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%')
              AND ($2::customer_type IS NULL OR customer_type = $2)
            "#,
        )
        .bind(search)
        .bind(customer_type)
        .fetch_one(&self.pool)
        .await?;

        Ok((customers, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        code: &str,
        name: &str,
        customer_type: CustomerType,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        tax_number: Option<&str>,
        bank_account: Option<&str>,
        credit_limit: Decimal,
        credit_days: i32,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                code, name, customer_type, email, phone, address,
                tax_number, bank_account, credit_limit, credit_days
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(customer_type)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(tax_number)
        .bind(bank_account)
        .bind(credit_limit)
        .bind(credit_days)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Código de cliente");
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
        customer_type: Option<CustomerType>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        tax_number: Option<&str>,
        bank_account: Option<&str>,
        credit_limit: Option<Decimal>,
        credit_days: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                name          = COALESCE($2, name),
                customer_type = COALESCE($3, customer_type),
                email         = COALESCE($4, email),
                phone         = COALESCE($5, phone),
                address       = COALESCE($6, address),
                tax_number    = COALESCE($7, tax_number),
                bank_account  = COALESCE($8, bank_account),
                credit_limit  = COALESCE($9, credit_limit),
                credit_days   = COALESCE($10, credit_days),
                is_active     = COALESCE($11, is_active),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(customer_type)
        .bind(email)
        .bind(phone)
        .bind(address)
        .bind(tax_number)
        .bind(bank_account)
        .bind(credit_limit)
        .bind(credit_days)
        .bind(is_active)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Cliente"))?;

        Ok(customer)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente"));
        }
        Ok(())
    }
}
