// src/services/finance_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, SequenceRepository},
    models::finance::{
        Account, AccountNode, AccountType, Transaction, TransactionDetail, TransactionDirection,
        TransactionType,
    },
};

#[derive(Clone)]
pub struct FinanceService {
    finance_repo: FinanceRepository,
    sequence_repo: SequenceRepository,
    pool: PgPool,
}

impl FinanceService {
    pub fn new(
        finance_repo: FinanceRepository,
        sequence_repo: SequenceRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            finance_repo,
            sequence_repo,
            pool,
        }
    }

    // ---
    // Plano de contas
    // ---

    /// Árvore com um nível: contas raiz e suas filhas diretas.
    pub async fn list_account_tree(&self) -> Result<Vec<AccountNode>, AppError> {
        let roots = self.finance_repo.list_root_accounts().await?;

        let mut nodes = Vec::with_capacity(roots.len());
        for account in roots {
            let children = self.finance_repo.list_children(account.id).await?;
            nodes.push(AccountNode { account, children });
        }
        Ok(nodes)
    }

    pub async fn create_account(
        &self,
        code: &str,
        name: &str,
        account_type: AccountType,
        parent_id: Option<Uuid>,
    ) -> Result<Account, AppError> {
        self.finance_repo
            .create_account(&self.pool, code, name, account_type, parent_id)
            .await
    }

    // ---
    // Lançamentos
    // ---

    pub async fn list_transactions(
        &self,
        transaction_type: Option<TransactionType>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TransactionDetail>, i64), AppError> {
        self.finance_repo
            .list_transactions(transaction_type, limit, offset)
            .await
    }

    /// Cria o lançamento com número de voucher V do dia. Número e inserção
    /// compartilham a transação, então o voucher reservado nunca fica órfão.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_transaction(
        &self,
        date: DateTime<Utc>,
        transaction_type: TransactionType,
        account_id: Uuid,
        amount: Decimal,
        direction: TransactionDirection,
        reference_type: Option<&str>,
        reference_id: Option<&str>,
        description: &str,
    ) -> Result<Transaction, AppError> {
        let mut tx = self.pool.begin().await?;

        let voucher_no = self
            .sequence_repo
            .next_document_number(&mut *tx, "V")
            .await?;

        let transaction = self
            .finance_repo
            .insert_transaction(
                &mut *tx,
                &voucher_no,
                date,
                transaction_type,
                account_id,
                amount,
                direction,
                reference_type,
                reference_id,
                description,
            )
            .await?;

        tx.commit().await?;
        Ok(transaction)
    }
}
