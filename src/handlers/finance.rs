// src/handlers/finance.rs
//
// Plano de contas e lançamentos (vouchers) num só lugar: as duas rotas
// compõem o módulo financeiro.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    handlers::products::validate_not_negative,
    middleware::auth::AuthenticatedUser,
    models::finance::{AccountType, TransactionDirection, TransactionType},
};

// =============================================================================
//  CONTAS
// =============================================================================

// GET /api/accounts — árvore com um nível (raízes + filhas)
pub async fn list_accounts(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let accounts = app_state.finance_service.list_account_tree().await?;
    Ok((StatusCode::OK, Json(json!({ "data": accounts }))))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    pub parent_id: Option<Uuid>,
}

// POST /api/accounts
pub async fn create_account(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let account = app_state
        .finance_service
        .create_account(
            &payload.code,
            &payload.name,
            payload.account_type,
            payload.parent_id,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "account", account.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(account)))
}

// =============================================================================
//  LANÇAMENTOS
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

// GET /api/transactions
pub async fn list_transactions(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);

    let (transactions, total) = app_state
        .finance_service
        .list_transactions(params.transaction_type, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(transactions, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub account_id: Uuid,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    pub direction: TransactionDirection,

    pub reference_type: Option<String>,
    pub reference_id: Option<String>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
}

// POST /api/transactions — número de voucher V + inserção em transação
pub async fn create_transaction(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .create_transaction(
            payload.date,
            payload.transaction_type,
            payload.account_id,
            payload.amount,
            payload.direction,
            payload.reference_type.as_deref(),
            payload.reference_id.as_deref(),
            &payload.description,
        )
        .await?;

    app_state
        .activity_service
        .log(
            user.0.id,
            "CREATE",
            "transaction",
            transaction.id,
            Some(&transaction.voucher_no),
            None,
        )
        .await;

    Ok((StatusCode::CREATED, Json(transaction)))
}
