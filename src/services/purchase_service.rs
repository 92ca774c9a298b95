// src/services/purchase_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PurchaseRepository, SequenceRepository},
    models::purchases::{Purchase, PurchaseDetail, PurchaseStatus, PurchaseSummary},
    services::order_service::line_amount,
};

#[derive(Debug, Clone)]
pub struct NewPurchaseLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub tax_rate: Decimal,
    pub note: Option<String>,
}

#[derive(Clone)]
pub struct PurchaseService {
    purchase_repo: PurchaseRepository,
    sequence_repo: SequenceRepository,
    pool: PgPool,
}

impl PurchaseService {
    pub fn new(
        purchase_repo: PurchaseRepository,
        sequence_repo: SequenceRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            purchase_repo,
            sequence_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<PurchaseStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PurchaseSummary>, i64), AppError> {
        self.purchase_repo.list(search, status, limit, offset).await
    }

    /// Cria a ordem de compra com número PO do dia e itens, em uma transação.
    /// O valor final é o próprio total: imposto de compra fica por linha.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        supplier_id: Uuid,
        lines: Vec<NewPurchaseLine>,
        expected_date: Option<DateTime<Utc>>,
        warehouse_id: Option<Uuid>,
        note: Option<&str>,
        purchaser_id: Option<Uuid>,
    ) -> Result<PurchaseDetail, AppError> {
        let supplier_name = self.purchase_repo.supplier_name(supplier_id).await?;

        let amounts: Vec<Decimal> = lines
            .iter()
            .map(|l| line_amount(l.quantity, l.unit_price, Decimal::ZERO))
            .collect();
        let total: Decimal = amounts.iter().copied().sum();

        let mut tx = self.pool.begin().await?;

        let purchase_number = self
            .sequence_repo
            .next_document_number(&mut *tx, "PO")
            .await?;

        let purchase = self
            .purchase_repo
            .insert_purchase(
                &mut *tx,
                &purchase_number,
                supplier_id,
                total,
                Decimal::ZERO,
                total,
                expected_date,
                warehouse_id,
                note,
                purchaser_id,
            )
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (line, amount) in lines.iter().zip(amounts) {
            let item = self
                .purchase_repo
                .insert_item(
                    &mut *tx,
                    purchase.id,
                    line.product_id,
                    line.quantity,
                    line.unit_price,
                    line.tax_rate,
                    amount,
                    line.note.as_deref(),
                )
                .await?;
            items.push(item);
        }

        tx.commit().await?;

        Ok(PurchaseDetail {
            purchase,
            supplier_name,
            items,
        })
    }

    /// Status e data de recebimento são livres; os demais campos do
    /// cabeçalho exigem DRAFT.
    pub async fn update(
        &self,
        id: Uuid,
        status: Option<PurchaseStatus>,
        expected_date: Option<DateTime<Utc>>,
        received_date: Option<DateTime<Utc>>,
        warehouse_id: Option<Uuid>,
        note: Option<&str>,
    ) -> Result<Purchase, AppError> {
        let purchase = self
            .purchase_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Ordem de compra"))?;

        let touches_content =
            expected_date.is_some() || warehouse_id.is_some() || note.is_some();
        if touches_content && purchase.status != PurchaseStatus::Draft {
            return Err(AppError::NotDraft);
        }

        self.purchase_repo
            .update_header(
                &self.pool,
                id,
                status,
                expected_date,
                received_date,
                warehouse_id,
                note,
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let purchase = self
            .purchase_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Ordem de compra"))?;

        if purchase.status != PurchaseStatus::Draft {
            return Err(AppError::NotDraft);
        }

        self.purchase_repo.delete(&self.pool, id).await
    }
}
