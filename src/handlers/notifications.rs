// src/handlers/notifications.rs

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
    common::{error::AppError, pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    middleware::rbac::{AdminOrManager, RequireRole},
    models::notifications::NotificationList,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(default)]
    pub unread_only: bool,
}

// GET /api/notifications — sempre as do usuário autenticado
pub async fn list_notifications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);

    let (data, total, unread_count) = app_state
        .notification_service
        .list_for_user(user.0.id, params.unread_only, page_size, offset)
        .await?;

    let total_pages = if total == 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    };

    Ok((
        StatusCode::OK,
        Json(NotificationList {
            data,
            total,
            unread_count,
            page,
            page_size,
            total_pages,
        }),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationPayload {
    pub user_id: Uuid,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "O tipo é obrigatório."))]
    pub notification_type: String,

    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,

    #[validate(length(min = 1, message = "O conteúdo é obrigatório."))]
    pub content: String,

    pub link: Option<String>,
}

// POST /api/notifications — administrador ou gerente
pub async fn create_notification(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    _guard: RequireRole<AdminOrManager>,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let notification = app_state
        .notification_service
        .create(
            payload.user_id,
            &payload.notification_type,
            &payload.title,
            &payload.content,
            payload.link.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadPayload {
    pub notification_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub mark_all_read: bool,
}

// PUT /api/notifications — marca como lidas (ids específicos ou todas)
pub async fn mark_notifications_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<MarkReadPayload>,
) -> Result<impl IntoResponse, AppError> {
    if payload.mark_all_read {
        app_state
            .notification_service
            .mark_all_read(user.0.id)
            .await?;
    } else if let Some(ids) = &payload.notification_ids {
        app_state
            .notification_service
            .mark_read(user.0.id, ids)
            .await?;
    }

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
