// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Depósitos ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Saldo de Estoque ---
// Um registro por par (produto, depósito). `quantity` só muda através do
// ajuste de estoque, que grava a movimentação correspondente na mesma
// transação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i32,
    pub reserved_qty: i32,
    pub reorder_point: i32,
    pub safety_stock: i32,
    pub location: Option<String>,
    pub last_check_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Tipos de movimentação. O sinal do delta é derivado daqui: *_IN soma,
// *_OUT subtrai.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    PurchaseIn,
    SaleOut,
    ReturnIn,
    TransferIn,
    TransferOut,
    AdjustmentIn,
    AdjustmentOut,
}

impl MovementType {
    pub fn is_inbound(self) -> bool {
        matches!(
            self,
            MovementType::PurchaseIn
                | MovementType::ReturnIn
                | MovementType::TransferIn
                | MovementType::AdjustmentIn
        )
    }

    /// Delta assinado a aplicar no saldo a partir da magnitude informada.
    pub fn signed_delta(self, magnitude: i32) -> i32 {
        let magnitude = magnitude.abs();
        if self.is_inbound() {
            magnitude
        } else {
            -magnitude
        }
    }
}

// --- Movimentação (livro-razão, append-only) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMovement {
    pub id: Uuid,
    pub inventory_id: Uuid,
    pub warehouse_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i32,
    pub operator_id: Uuid,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Linha de listagem com produto e depósito resolvidos.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: InventoryRecord,
    pub product_name: String,
    pub product_sku: String,
    pub warehouse_name: String,
}

// Movimentação com nomes resolvidos, para o relatório de estoque.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub movement: InventoryMovement,
    pub product_name: String,
    pub product_sku: String,
    pub warehouse_name: String,
    pub operator_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entradas_somam_saidas_subtraem() {
        // Propriedade central do ajuste: o sinal vem do tipo, nunca do chamador.
        assert_eq!(MovementType::PurchaseIn.signed_delta(50), 50);
        assert_eq!(MovementType::ReturnIn.signed_delta(7), 7);
        assert_eq!(MovementType::TransferIn.signed_delta(3), 3);
        assert_eq!(MovementType::AdjustmentIn.signed_delta(1), 1);

        assert_eq!(MovementType::SaleOut.signed_delta(20), -20);
        assert_eq!(MovementType::TransferOut.signed_delta(4), -4);
        assert_eq!(MovementType::AdjustmentOut.signed_delta(30), -30);
    }

    #[test]
    fn magnitude_negativa_e_normalizada() {
        // O chamador manda magnitude; sinal negativo de entrada é descartado.
        assert_eq!(MovementType::PurchaseIn.signed_delta(-50), 50);
        assert_eq!(MovementType::SaleOut.signed_delta(-20), -20);
    }

    #[test]
    fn tipo_serializa_no_formato_da_api() {
        assert_eq!(
            serde_json::to_string(&MovementType::PurchaseIn).unwrap(),
            "\"PURCHASE_IN\""
        );
        assert_eq!(
            serde_json::to_string(&MovementType::AdjustmentOut).unwrap(),
            "\"ADJUSTMENT_OUT\""
        );
        let parsed: MovementType = serde_json::from_str("\"SALE_OUT\"").unwrap();
        assert_eq!(parsed, MovementType::SaleOut);
    }
}
