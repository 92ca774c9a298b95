// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportParams {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/reports/sales?type=summary|daily|topProducts
pub async fn sales_report(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<SalesReportParams>,
) -> Result<impl IntoResponse, AppError> {
    let report_type = params.report_type.as_deref().unwrap_or("summary");

    match report_type {
        "summary" => {
            let summary = app_state
                .report_service
                .sales_summary(params.start_date, params.end_date)
                .await?;
            Ok((
                StatusCode::OK,
                Json(json!({
                    "type": "summary",
                    "period": { "startDate": params.start_date, "endDate": params.end_date },
                    "summary": summary,
                })),
            ))
        }
        "daily" => {
            let data = app_state
                .report_service
                .sales_daily(params.start_date, params.end_date)
                .await?;
            Ok((StatusCode::OK, Json(json!({ "type": "daily", "data": data }))))
        }
        "topProducts" => {
            let data = app_state.report_service.top_products().await?;
            Ok((
                StatusCode::OK,
                Json(json!({ "type": "topProducts", "data": data })),
            ))
        }
        _ => Err(AppError::ValidationError(report_type_error())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportParams {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
}

// GET /api/reports/inventory?type=status|movements
pub async fn inventory_report(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<InventoryReportParams>,
) -> Result<impl IntoResponse, AppError> {
    let report_type = params.report_type.as_deref().unwrap_or("status");

    match report_type {
        "status" => {
            let report = app_state.report_service.inventory_status().await?;
            Ok((
                StatusCode::OK,
                Json(json!({
                    "type": "status",
                    "summary": report.summary,
                    "details": report.details,
                })),
            ))
        }
        "movements" => {
            let data = app_state.report_service.inventory_movements().await?;
            Ok((
                StatusCode::OK,
                Json(json!({ "type": "movements", "data": data })),
            ))
        }
        _ => Err(AppError::ValidationError(report_type_error())),
    }
}

/// Erro 400 padronizado para tipo de relatório desconhecido.
fn report_type_error() -> validator::ValidationErrors {
    let mut errors = validator::ValidationErrors::new();
    let mut err = validator::ValidationError::new("unknown");
    err.message = Some("Tipo de relatório não suportado.".into());
    errors.add("type", err);
    errors
}
