// src/db/finance_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{
        Account, AccountType, Transaction, TransactionDetail, TransactionDirection,
        TransactionType,
    },
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PLANO DE CONTAS
    // =========================================================================

    /// Contas de primeiro nível, em ordem de código. As filhas são buscadas
    /// separadamente e montadas no service.
    pub async fn list_root_accounts(&self) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE parent_id IS NULL ORDER BY code ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    pub async fn list_children(&self, parent_id: Uuid) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE parent_id = $1 ORDER BY code ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    pub async fn create_account<'e, E>(
        &self,
        executor: E,
        code: &str,
        name: &str,
        account_type: AccountType,
        parent_id: Option<Uuid>,
    ) -> Result<Account, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (code, name, account_type, parent_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(account_type)
        .bind(parent_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Código de conta");
                }
            }
            e.into()
        })
    }

    // =========================================================================
    //  LANÇAMENTOS (VOUCHERS)
    // =========================================================================

    pub async fn list_transactions(
        &self,
        transaction_type: Option<TransactionType>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TransactionDetail>, i64), AppError> {
        let transactions = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT t.*, a.code AS account_code, a.name AS account_name
            FROM transactions t
            JOIN accounts a ON a.id = t.account_id
            WHERE ($1::transaction_type IS NULL OR t.transaction_type = $1)
            ORDER BY t.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(transaction_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM transactions
            WHERE ($1::transaction_type IS NULL OR transaction_type = $1)
            "#,
        )
        .bind(transaction_type)
        .fetch_one(&self.pool)
        .await?;

        Ok((transactions, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_transaction<'e, E>(
        &self,
        executor: E,
        voucher_no: &str,
        date: DateTime<Utc>,
        transaction_type: TransactionType,
        account_id: Uuid,
        amount: Decimal,
        direction: TransactionDirection,
        reference_type: Option<&str>,
        reference_id: Option<&str>,
        description: &str,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                voucher_no, date, transaction_type, account_id, amount,
                direction, reference_type, reference_id, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(voucher_no)
        .bind(date)
        .bind(transaction_type)
        .bind(account_id)
        .bind(amount)
        .bind(direction)
        .bind(reference_type)
        .bind(reference_id)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(transaction)
    }
}
