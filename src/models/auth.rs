// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papéis de acesso. O papel mora na linha do usuário; os guardiões de
// rota (middleware/rbac.rs) decidem em cima dele.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Manager,
    Sales,
    Purchase,
    Warehouse,
    Finance,
    Employee,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing, default)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@empresa.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token e o usuário logado
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn papel_serializa_em_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"ADMIN\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Warehouse).unwrap(),
            "\"WAREHOUSE\""
        );
    }

    #[test]
    fn payload_de_login_valida_email_e_senha() {
        let ok = LoginPayload {
            email: "a@b.com".into(),
            password: "123456".into(),
        };
        assert!(ok.validate().is_ok());

        let ruim = LoginPayload {
            email: "nao-e-email".into(),
            password: "123".into(),
        };
        let errs = ruim.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("email"));
        assert!(errs.field_errors().contains_key("password"));
    }
}
