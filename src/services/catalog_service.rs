// src/services/catalog_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Category, Product, ProductDetail},
};

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository, pool: PgPool) -> Self {
        Self { catalog_repo, pool }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.catalog_repo.list_categories().await
    }

    pub async fn create_category(
        &self,
        name: &str,
        slug: &str,
        description: Option<&str>,
        parent_id: Option<Uuid>,
        sort_order: i32,
    ) -> Result<Category, AppError> {
        self.catalog_repo
            .create_category(&self.pool, name, slug, description, parent_id, sort_order)
            .await
    }

    pub async fn list_products(
        &self,
        search: Option<&str>,
        category_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductDetail>, i64), AppError> {
        self.catalog_repo
            .list_products(search, category_id, limit, offset)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        sku: &str,
        barcode: Option<&str>,
        name: &str,
        description: Option<&str>,
        category_id: Uuid,
        unit: &str,
        cost_price: Decimal,
        sell_price: Decimal,
        min_price: Option<Decimal>,
        weight: Option<Decimal>,
        images: &[String],
        is_featured: bool,
    ) -> Result<Product, AppError> {
        self.catalog_repo
            .create_product(
                &self.pool,
                sku,
                barcode,
                name,
                description,
                category_id,
                unit,
                cost_price,
                sell_price,
                min_price,
                weight,
                images,
                is_featured,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        barcode: Option<&str>,
        category_id: Option<Uuid>,
        unit: Option<&str>,
        cost_price: Option<Decimal>,
        sell_price: Option<Decimal>,
        min_price: Option<Decimal>,
        weight: Option<Decimal>,
        is_featured: Option<bool>,
    ) -> Result<Product, AppError> {
        self.catalog_repo
            .update_product(
                &self.pool,
                id,
                name,
                description,
                barcode,
                category_id,
                unit,
                cost_price,
                sell_price,
                min_price,
                weight,
                is_featured,
            )
            .await
    }

    pub async fn deactivate_product(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog_repo.deactivate_product(&self.pool, id).await
    }
}
