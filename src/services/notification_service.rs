// src/services/notification_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError, db::NotificationRepository, models::notifications::Notification,
};

#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    pool: PgPool,
}

impl NotificationService {
    pub fn new(notification_repo: NotificationRepository, pool: PgPool) -> Self {
        Self {
            notification_repo,
            pool,
        }
    }

    /// Retorna (notificações, total filtrado, não lidas do usuário).
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Notification>, i64, i64), AppError> {
        self.notification_repo
            .list_for_user(user_id, unread_only, limit, offset)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        notification_type: &str,
        title: &str,
        content: &str,
        link: Option<&str>,
    ) -> Result<Notification, AppError> {
        self.notification_repo
            .create(&self.pool, user_id, notification_type, title, content, link)
            .await
    }

    pub async fn mark_read(&self, user_id: Uuid, ids: &[Uuid]) -> Result<u64, AppError> {
        self.notification_repo
            .mark_read(&self.pool, user_id, ids)
            .await
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        self.notification_repo
            .mark_all_read(&self.pool, user_id)
            .await
    }
}
