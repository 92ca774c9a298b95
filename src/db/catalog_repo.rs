// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Product, ProductDetail},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CATEGORIAS
    // =========================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE is_active = TRUE ORDER BY sort_order ASC, name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        name: &str,
        slug: &str,
        description: Option<&str>,
        parent_id: Option<Uuid>,
        sort_order: i32,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description, parent_id, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(parent_id)
        .bind(sort_order)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Slug de categoria");
                }
            }
            e.into()
        })
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    pub async fn list_products(
        &self,
        search: Option<&str>,
        category_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductDetail>, i64), AppError> {
        let products = sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT p.*, c.name AS category_name
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.is_active = TRUE
              AND ($1::text IS NULL
                   OR p.name ILIKE '%' || $1 || '%'
                   OR p.sku ILIKE '%' || $1 || '%'
                   OR p.barcode ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR p.category_id = $2)
            ORDER BY p.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(category_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products p
            WHERE p.is_active = TRUE
              AND ($1::text IS NULL
                   OR p.name ILIKE '%' || $1 || '%'
                   OR p.sku ILIKE '%' || $1 || '%'
                   OR p.barcode ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR p.category_id = $2)
            "#,
        )
        .bind(search)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((products, total))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
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
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                sku, barcode, name, description, category_id, unit,
                cost_price, sell_price, min_price, weight, images, is_featured
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(sku)
        .bind(barcode)
        .bind(name)
        .bind(description)
        .bind(category_id)
        .bind(unit)
        .bind(cost_price)
        .bind(sell_price)
        .bind(min_price)
        .bind(weight)
        .bind(images)
        .bind(is_featured)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("SKU");
                }
            }
            e.into()
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product<'e, E>(
        &self,
        executor: E,
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
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name        = COALESCE($2, name),
                description = COALESCE($3, description),
                barcode     = COALESCE($4, barcode),
                category_id = COALESCE($5, category_id),
                unit        = COALESCE($6, unit),
                cost_price  = COALESCE($7, cost_price),
                sell_price  = COALESCE($8, sell_price),
                min_price   = COALESCE($9, min_price),
                weight      = COALESCE($10, weight),
                is_featured = COALESCE($11, is_featured),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(barcode)
        .bind(category_id)
        .bind(unit)
        .bind(cost_price)
        .bind(sell_price)
        .bind(min_price)
        .bind(weight)
        .bind(is_featured)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::NotFound("Produto"))?;

        Ok(product)
    }

    /// Exclusão lógica: o produto sai das listagens mas as referências
    /// históricas (itens de pedido, movimentações) continuam válidas.
    pub async fn deactivate_product<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result =
            sqlx::query("UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(executor)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Produto"));
        }
        Ok(())
    }
}
