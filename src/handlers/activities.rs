// src/handlers/activities.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub entity_type: Option<String>,
    pub user_id: Option<Uuid>,
}

// GET /api/activities — trilha de auditoria, só leitura
pub async fn list_activities(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<ActivityListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);

    let (activities, total) = app_state
        .activity_service
        .list(
            params.entity_type.as_deref(),
            params.user_id,
            page_size,
            offset,
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(activities, total, page, page_size)),
    ))
}
