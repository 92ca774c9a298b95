// src/handlers/orders.rs

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
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    handlers::products::validate_not_negative,
    middleware::auth::AuthenticatedUser,
    models::orders::OrderStatus,
    services::order_service::{default_tax_rate, NewOrderLine},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Listagem paginada de pedidos de venda")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<OrderListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (orders, total) = app_state
        .order_service
        .list(search, params.status, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(orders, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser um inteiro positivo."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    #[serde(default)]
    pub discount: Decimal,

    #[serde(default)]
    pub tax_rate: Decimal,

    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub customer_id: Uuid,

    #[validate(length(min = 1, message = "O pedido precisa de ao menos um item."), nested)]
    pub items: Vec<OrderLinePayload>,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub discount: Decimal,

    // Sem alíquota informada, vale a padrão (13%).
    pub tax_rate: Option<Decimal>,

    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_address: Option<String>,
    pub note: Option<String>,
}

// POST /api/orders — número SO + itens + totais em uma transação
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado", body = crate::models::orders::OrderDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lines: Vec<NewOrderLine> = payload
        .items
        .iter()
        .map(|item| NewOrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
            tax_rate: item.tax_rate,
            note: item.note.clone(),
        })
        .collect();

    let detail = app_state
        .order_service
        .create(
            payload.customer_id,
            lines,
            payload.discount,
            payload.tax_rate.unwrap_or_else(default_tax_rate),
            payload.delivery_date,
            payload.delivery_address.as_deref(),
            payload.note.as_deref(),
            Some(user.0.id),
        )
        .await?;

    app_state
        .activity_service
        .log(
            user.0.id,
            "CREATE",
            "order",
            detail.order.id,
            Some(&detail.order.order_number),
            None,
        )
        .await;

    Ok((StatusCode::CREATED, Json(detail)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    pub id: Uuid,
    pub status: Option<OrderStatus>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_address: Option<String>,
    pub note: Option<String>,
    pub discount: Option<Decimal>,
}

// PUT /api/orders — status livre; conteúdo só em DRAFT
#[utoipa::path(
    put,
    path = "/api/orders",
    tag = "Orders",
    request_body = UpdateOrderPayload,
    responses(
        (status = 200, description = "Pedido atualizado", body = crate::models::orders::Order),
        (status = 400, description = "Pedido fora de rascunho"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state
        .order_service
        .update(
            payload.id,
            payload.status,
            payload.delivery_date,
            payload.delivery_address.as_deref(),
            payload.note.as_deref(),
            payload.discount,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "order", order.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(order)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/orders?id= — só rascunhos
#[utoipa::path(
    delete,
    path = "/api/orders",
    tag = "Orders",
    params(("id" = Uuid, Query, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido excluído"),
        (status = 400, description = "Pedido fora de rascunho"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.order_service.delete(params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "order", params.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(json!({ "message": "Pedido excluído" }))))
}
