// src/handlers/purchases.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    handlers::products::validate_not_negative,
    middleware::auth::AuthenticatedUser,
    models::purchases::PurchaseStatus,
    services::purchase_service::NewPurchaseLine,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub status: Option<PurchaseStatus>,
}

// GET /api/purchases
pub async fn list_purchases(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<PurchaseListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (purchases, total) = app_state
        .purchase_service
        .list(search, params.status, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(purchases, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLinePayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser um inteiro positivo."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    #[serde(default)]
    pub tax_rate: Decimal,

    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    pub supplier_id: Uuid,

    #[validate(length(min = 1, message = "A ordem de compra precisa de ao menos um item."), nested)]
    pub items: Vec<PurchaseLinePayload>,

    pub expected_date: Option<DateTime<Utc>>,
    pub warehouse_id: Option<Uuid>,
    pub note: Option<String>,
}

// POST /api/purchases — número PO + itens em uma transação
pub async fn create_purchase(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lines: Vec<NewPurchaseLine> = payload
        .items
        .iter()
        .map(|item| NewPurchaseLine {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            tax_rate: item.tax_rate,
            note: item.note.clone(),
        })
        .collect();

    let detail = app_state
        .purchase_service
        .create(
            payload.supplier_id,
            lines,
            payload.expected_date,
            payload.warehouse_id,
            payload.note.as_deref(),
            Some(user.0.id),
        )
        .await?;

    app_state
        .activity_service
        .log(
            user.0.id,
            "CREATE",
            "purchase",
            detail.purchase.id,
            Some(&detail.purchase.purchase_number),
            None,
        )
        .await;

    Ok((StatusCode::CREATED, Json(detail)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchasePayload {
    pub id: Uuid,
    pub status: Option<PurchaseStatus>,
    pub expected_date: Option<DateTime<Utc>>,
    pub received_date: Option<DateTime<Utc>>,
    pub warehouse_id: Option<Uuid>,
    pub note: Option<String>,
}

// PUT /api/purchases — status e recebimento livres; conteúdo só em DRAFT
pub async fn update_purchase(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let purchase = app_state
        .purchase_service
        .update(
            payload.id,
            payload.status,
            payload.expected_date,
            payload.received_date,
            payload.warehouse_id,
            payload.note.as_deref(),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "purchase", purchase.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(purchase)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/purchases?id= — só rascunhos
pub async fn delete_purchase(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.purchase_service.delete(params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "purchase", params.id, None, None)
        .await;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Ordem de compra excluída" })),
    ))
}
