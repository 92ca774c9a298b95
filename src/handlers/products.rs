// src/handlers/products.rs

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
use validator::{Validate, ValidationError};

use crate::{
    common::{error::AppError, pagination, pagination::Paginated},
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
}

// GET /api/products
pub async fn list_products(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<ProductListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, page_size, offset) = pagination::normalize(params.page, params.page_size);
    let search = pagination::search_term(&params.search);

    let (products, total) = app_state
        .catalog_service
        .list_products(search, params.category_id, page_size, offset)
        .await?;

    Ok((
        StatusCode::OK,
        Json(Paginated::new(products, total, page, page_size)),
    ))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    pub barcode: Option<String>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,
    pub category_id: Uuid,
    pub unit: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub sell_price: Decimal,

    pub min_price: Option<Decimal>,
    pub weight: Option<Decimal>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub is_featured: bool,
}

// POST /api/products
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .create_product(
            &payload.sku,
            payload.barcode.as_deref(),
            &payload.name,
            payload.description.as_deref(),
            payload.category_id,
            payload.unit.as_deref().unwrap_or("un"),
            payload.cost_price,
            payload.sell_price,
            payload.min_price,
            payload.weight,
            &payload.images,
            payload.is_featured,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "product", product.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub barcode: Option<String>,
    pub category_id: Option<Uuid>,
    pub unit: Option<String>,
    pub cost_price: Option<Decimal>,
    pub sell_price: Option<Decimal>,
    pub min_price: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub is_featured: Option<bool>,
}

// PUT /api/products
pub async fn update_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .catalog_service
        .update_product(
            payload.id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.barcode.as_deref(),
            payload.category_id,
            payload.unit.as_deref(),
            payload.cost_price,
            payload.sell_price,
            payload.min_price,
            payload.weight,
            payload.is_featured,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "UPDATE", "product", product.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(product)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Uuid,
}

// DELETE /api/products?id= — exclusão lógica (is_active = false)
pub async fn delete_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.deactivate_product(params.id).await?;

    app_state
        .activity_service
        .log(user.0.id, "DELETE", "product", params.id, None, None)
        .await;

    Ok((StatusCode::OK, Json(json!({ "message": "Produto excluído" }))))
}

// =============================================================================
//  CATEGORIAS
// =============================================================================

// GET /api/categories
pub async fn list_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O slug é obrigatório."))]
    pub slug: String,

    pub description: Option<String>,
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub sort_order: i32,
}

// POST /api/categories
pub async fn create_category(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .catalog_service
        .create_category(
            &payload.name,
            &payload.slug,
            payload.description.as_deref(),
            payload.parent_id,
            payload.sort_order,
        )
        .await?;

    app_state
        .activity_service
        .log(user.0.id, "CREATE", "category", category.id, None, None)
        .await;

    Ok((StatusCode::CREATED, Json(category)))
}
