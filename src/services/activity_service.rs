// src/services/activity_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::ActivityRepository, models::activities::ActivityDetail};

#[derive(Clone)]
pub struct ActivityService {
    activity_repo: ActivityRepository,
    pool: PgPool,
}

impl ActivityService {
    pub fn new(activity_repo: ActivityRepository, pool: PgPool) -> Self {
        Self {
            activity_repo,
            pool,
        }
    }

    pub async fn list(
        &self,
        entity_type: Option<&str>,
        user_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ActivityDetail>, i64), AppError> {
        self.activity_repo
            .list(entity_type, user_id, limit, offset)
            .await
    }

    /// Grava uma entrada na trilha de auditoria. Melhor esforço: falha de
    /// auditoria não derruba a operação que a originou.
    pub async fn log(
        &self,
        user_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: impl ToString,
        details: Option<&str>,
        ip_address: Option<&str>,
    ) {
        if let Err(e) = self
            .activity_repo
            .insert(
                &self.pool,
                user_id,
                action,
                entity_type,
                &entity_id.to_string(),
                details,
                ip_address,
            )
            .await
        {
            tracing::warn!("Falha ao registrar atividade ({entity_type}/{action}): {e}");
        }
    }
}
