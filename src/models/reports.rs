// src/models/reports.rs
//
// DTOs dos relatórios. São montados por queries de agregação; nada aqui
// corresponde a uma tabela.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::InventoryDetail;
use crate::models::orders::OrderStatus;

// --- Vendas ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: OrderStatus,
    pub order_count: i64,
    pub total_amount: Decimal,
    pub final_amount: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub by_status: Vec<StatusBreakdown>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub date: NaiveDate,
    pub order_count: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

// --- Estoque ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatusSummary {
    pub total: i64,
    pub zero: i64,
    // 0 < quantity <= safety_stock
    pub low: i64,
    pub normal: i64,
    // Σ quantity × cost_price do catálogo
    pub total_value: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatusReport {
    pub summary: InventoryStatusSummary,
    pub details: Vec<InventoryDetail>,
}
