// src/handlers/inventory.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::MovementType,
};

// ---
// Parâmetros de listagem
// ---
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub warehouse_id: Option<Uuid>,
}

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Listagem paginada de saldos de estoque")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_inventory(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<InventoryListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (records, total) = app_state
        .inventory_service
        .list(search, params.warehouse_id, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(records, total, page, page_size)),
    ))
}

// ---
// Payload: Ajuste de estoque
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustInventoryPayload {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,

    #[serde(rename = "type")]
    #[schema(example = "PURCHASE_IN")]
    pub movement_type: MovementType,

    // Magnitude: o sinal vem do tipo de movimentação.
    #[validate(range(min = 1, message = "A quantidade deve ser um inteiro positivo."))]
    #[schema(example = 50)]
    pub quantity: i32,

    pub note: Option<String>,
}

// POST /api/inventory — ajusta o saldo e grava a movimentação
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = AdjustInventoryPayload,
    responses(
        (status = 200, description = "Saldo atualizado", body = crate::models::inventory::InventoryRecord),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn adjust_inventory(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AdjustInventoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = app_state
        .inventory_service
        .adjust(
            payload.product_id,
            payload.warehouse_id,
            payload.movement_type,
            payload.quantity,
            user.0.id,
            payload.note.as_deref(),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "ADJUST", "inventory", record.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(record)))
}

// ---
// Payload: metadados do registro (nunca quantidade)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryPayload {
    pub id: Uuid,

    #[validate(range(min = 0, message = "O ponto de ressuprimento não pode ser negativo."))]
    pub reorder_point: Option<i32>,

    #[validate(range(min = 0, message = "O estoque de segurança não pode ser negativo."))]
    pub safety_stock: Option<i32>,

    pub location: Option<String>,
}

// PUT /api/inventory
#[utoipa::path(
    put,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = UpdateInventoryPayload,
    responses(
        (status = 200, description = "Metadados atualizados", body = crate::models::inventory::InventoryRecord),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_inventory(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateInventoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = app_state
        .inventory_service
        .update_meta(
            payload.id,
            payload.reorder_point,
            payload.safety_stock,
            payload.location.as_deref(),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "inventory", record.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(record)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/inventory?id= — só com saldo zero
#[utoipa::path(
    delete,
    path = "/api/inventory",
    tag = "Inventory",
    params(("id" = Uuid, Query, description = "ID do registro de estoque")),
    responses(
        (status = 200, description = "Registro excluído"),
        (status = 400, description = "Estoque não zerado"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_inventory(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete(params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "inventory", params.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(json!({ "message": "Registro excluído" }))))
}
