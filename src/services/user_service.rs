// src/services/user_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{User, UserRole},
    services::auth::hash_password,
};

/// Um administrador não pode excluir a própria conta.
pub fn ensure_not_self(caller_id: Uuid, target_id: Uuid) -> Result<(), AppError> {
    if caller_id == target_id {
        return Err(AppError::SelfDelete);
    }
    Ok(())
}

#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        role: Option<UserRole>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        self.user_repo.list(search, role, limit, offset).await
    }

    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
        phone: Option<&str>,
        department: Option<&str>,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password).await?;
        self.user_repo
            .create(
                &self.pool,
                email,
                &password_hash,
                name,
                role,
                phone,
                department,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        role: Option<UserRole>,
        phone: Option<&str>,
        department: Option<&str>,
        is_active: Option<bool>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let password_hash = match password {
            Some(p) => Some(hash_password(p).await?),
            None => None,
        };

        self.user_repo
            .update(
                &self.pool,
                id,
                name,
                role,
                phone,
                department,
                is_active,
                password_hash.as_deref(),
            )
            .await
    }

    pub async fn delete(&self, caller_id: Uuid, id: Uuid) -> Result<(), AppError> {
        ensure_not_self(caller_id, id)?;
        self.user_repo.delete(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluir_a_si_mesmo_e_bloqueado() {
        let id = Uuid::new_v4();
        assert!(matches!(ensure_not_self(id, id), Err(AppError::SelfDelete)));
    }

    #[test]
    fn excluir_outro_usuario_passa() {
        assert!(ensure_not_self(Uuid::new_v4(), Uuid::new_v4()).is_ok());
    }
}
