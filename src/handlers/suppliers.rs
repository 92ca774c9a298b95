// src/handlers/suppliers.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
}

// GET /api/suppliers
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<SupplierListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (suppliers, total) = app_state
        .supplier_service
        .list(search, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(suppliers, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub contact_person: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    pub lead_time: Option<i32>,
    pub min_order_qty: Option<i32>,
}

// POST /api/suppliers
pub async fn create_supplier(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state
        .supplier_service
        .create(
            &payload.code,
            &payload.name,
            payload.contact_person.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.tax_number.as_deref(),
            payload.bank_account.as_deref(),
            payload.lead_time.unwrap_or(7),
            payload.min_order_qty.unwrap_or(1),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "supplier", supplier.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(supplier)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierPayload {
    pub id: Uuid,
    pub name: Option<String>,
    pub contact_person: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    pub lead_time: Option<i32>,
    pub min_order_qty: Option<i32>,
    pub is_active: Option<bool>,
}

// PUT /api/suppliers
pub async fn update_supplier(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state
        .supplier_service
        .update(
            payload.id,
            payload.name.as_deref(),
            payload.contact_person.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.tax_number.as_deref(),
            payload.bank_account.as_deref(),
            payload.lead_time,
            payload.min_order_qty,
            payload.is_active,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "supplier", supplier.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(supplier)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/suppliers?id=
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.supplier_service.delete(params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "supplier", params.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(json!({ "message": "Fornecedor excluído" }))))
}
