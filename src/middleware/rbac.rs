// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, models::auth::User, models::auth::UserRole};

/// 1. O Trait que define uma exigência de papel
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: &UserRole) -> bool;
}

/// 2. O Extractor (Guardião). Colocar nos argumentos do handler basta para
/// a rota exigir o papel — sem nada para esquecer no corpo da função.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // O auth_guard já rodou e deixou o usuário nos extensions.
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if !T::allows(&user.role) {
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// EXIGÊNCIAS USADAS PELAS ROTAS
// ---

/// Gestão de usuários é só do administrador.
pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn allows(role: &UserRole) -> bool {
        matches!(role, UserRole::Admin)
    }
}

/// Disparo de notificações: administrador ou gerente.
pub struct AdminOrManager;
impl RoleDef for AdminOrManager {
    fn allows(role: &UserRole) -> bool {
        matches!(role, UserRole::Admin | UserRole::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_only_recusa_os_demais_papeis() {
        assert!(AdminOnly::allows(&UserRole::Admin));
        assert!(!AdminOnly::allows(&UserRole::Manager));
        assert!(!AdminOnly::allows(&UserRole::Employee));
    }

    #[test]
    fn admin_or_manager_aceita_exatamente_os_dois() {
        assert!(AdminOrManager::allows(&UserRole::Admin));
        assert!(AdminOrManager::allows(&UserRole::Manager));
        assert!(!AdminOrManager::allows(&UserRole::Sales));
        assert!(!AdminOrManager::allows(&UserRole::Finance));
    }
}
