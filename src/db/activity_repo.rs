// src/db/activity_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activities::{Activity, ActivityDetail},
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        entity_type: Option<&str>,
        user_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ActivityDetail>, i64), AppError> {
        let activities = sqlx::query_as::<_, ActivityDetail>(
            r#"
            SELECT a.*, u.name AS user_name
            FROM activities a
            JOIN users u ON u.id = a.user_id
            WHERE ($1::text IS NULL OR a.entity_type = $1)
              AND ($2::uuid IS NULL OR a.user_id = $2)
            ORDER BY a.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(entity_type)
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM activities
            WHERE ($1::text IS NULL OR entity_type = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            "#,
        )
        .bind(entity_type)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((activities, total))
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        details: Option<&str>,
        ip_address: Option<&str>,
    ) -> Result<Activity, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (user_id, action, entity_type, entity_id, details, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .bind(ip_address)
        .fetch_one(executor)
        .await?;

        Ok(activity)
    }
}
