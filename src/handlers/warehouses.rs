// src/handlers/warehouses.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseListParams {
    pub search: Option<String>,
}

// GET /api/warehouses — lista completa, sem paginação (são poucos)
pub async fn list_warehouses(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<WarehouseListParams>,
) -> Result<impl IntoResponse, AppError> {
    let search = pagination::search_term(&params.search);
    let warehouses = app_state.warehouse_service.list(search).await?;
    Ok((StatusCode::OK, Json(warehouses)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehousePayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub address: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
}

// POST /api/warehouses
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateWarehousePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let warehouse = app_state
        .warehouse_service
        .create(
            &payload.code,
            &payload.name,
            payload.address.as_deref(),
            payload.contact.as_deref(),
            payload.phone.as_deref(),
            payload.manager_id,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "warehouse", warehouse.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(warehouse)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarehousePayload {
    pub id: Uuid,
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub manager_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

// PUT /api/warehouses
pub async fn update_warehouse(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateWarehousePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let warehouse = app_state
        .warehouse_service
        .update(
            payload.id,
            payload.name.as_deref(),
            payload.address.as_deref(),
            payload.contact.as_deref(),
            payload.phone.as_deref(),
            payload.manager_id,
            payload.is_active,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "warehouse", warehouse.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(warehouse)))
}
