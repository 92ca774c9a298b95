// src/handlers/customers.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::customers::CustomerType,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: Option<CustomerType>,
}

// GET /api/customers
pub async fn list_customers(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<CustomerListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (customers, total) = app_state
        .customer_service
        .list(search, params.customer_type, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(customers, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(rename = "type")]
    pub customer_type: Option<CustomerType>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub credit_days: Option<i32>,
}

// POST /api/customers
pub async fn create_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .customer_service
        .create(
            &payload.code,
            &payload.name,
            payload.customer_type.unwrap_or(CustomerType::Company),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.tax_number.as_deref(),
            payload.bank_account.as_deref(),
            payload.credit_limit.unwrap_or(Decimal::ZERO),
            payload.credit_days.unwrap_or(30),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "customer", customer.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(customer)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    pub id: Uuid,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: Option<CustomerType>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_number: Option<String>,
    pub bank_account: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub credit_days: Option<i32>,
    pub is_active: Option<bool>,
}

// PUT /api/customers
pub async fn update_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .customer_service
        .update(
            payload.id,
            payload.name.as_deref(),
            payload.customer_type,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
            payload.tax_number.as_deref(),
            payload.bank_account.as_deref(),
            payload.credit_limit,
            payload.credit_days,
            payload.is_active,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "customer", customer.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(customer)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/customers?id=
pub async fn delete_customer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.customer_service.delete(params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "customer", params.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(json!({ "message": "Cliente excluído" }))))
}
