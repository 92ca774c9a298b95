// src/handlers/users.rs

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
    middleware::rbac::{AdminOnly, RequireRole},
    models::auth::UserRole,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (users, total) = app_state
        .user_service
        .list(search, params.role, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(users, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

// POST /api/users — só administrador
pub async fn create_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state
        .user_service
        .create(
            &payload.email,
            &payload.password,
            &payload.name,
            payload.role.unwrap_or(UserRole::Employee),
            payload.phone.as_deref(),
            payload.department.as_deref(),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "user", created.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub is_active: Option<bool>,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: Option<String>,
}

// PUT /api/users — só administrador
pub async fn update_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = app_state
        .user_service
        .update(
            payload.id,
            payload.name.as_deref(),
            payload.role,
            payload.phone.as_deref(),
            payload.department.as_deref(),
            payload.is_active,
            payload.password.as_deref(),
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "user", updated.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(updated)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/users?id= — só administrador, nunca a própria conta
pub async fn delete_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<AdminOnly>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete(user.0.id, params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "user", params.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(json!({ "message": "Usuário excluído" }))))
}
