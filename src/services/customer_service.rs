// src/services/customer_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customers::{Customer, CustomerType},
};

#[derive(Clone)]
pub struct CustomerService {
    customer_repo: CustomerRepository,
    pool: PgPool,
}

impl CustomerService {
    pub fn new(customer_repo: CustomerRepository, pool: PgPool) -> Self {
        Self {
            customer_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        customer_type: Option<CustomerType>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Customer>, i64), AppError> {
        self.customer_repo
            .list(search, customer_type, limit, offset)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
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
    ) -> Result<Customer, AppError> {
        self.customer_repo
            .create(
                &self.pool,
                code,
                name,
                customer_type,
                email,
                phone,
                address,
                tax_number,
                bank_account,
                credit_limit,
                credit_days,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
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
    ) -> Result<Customer, AppError> {
        self.customer_repo
            .update(
                &self.pool,
                id,
                name,
                customer_type,
                email,
                phone,
                address,
                tax_number,
                bank_account,
                credit_limit,
                credit_days,
                is_active,
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.customer_repo.delete(&self.pool, id).await
    }
}
