// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Toda falha de handler/service/repo converge para cá e vira uma
// resposta JSON `{ "error": mensagem }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente")]
    InvalidToken,

    #[error("Conta desativada")]
    AccountDisabled,

    #[error("Permissão insuficiente")]
    Forbidden,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    // Conflito de chave natural (SKU, código, e-mail). A API trata
    // como requisição inválida (400), não como 409.
    #[error("{0} já existe")]
    AlreadyExists(&'static str),

    #[error("Estoque não zerado, não é possível excluir o registro")]
    NonZeroStock,

    #[error("Apenas documentos em rascunho podem ser alterados ou excluídos")]
    NotDraft,

    #[error("Não é possível excluir o próprio usuário")]
    SelfDelete,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Mapeamento de status isolado para poder ser testado sem montar a Response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::AlreadyExists(_)
            | AppError::NonZeroStock
            | AppError::NotDraft
            | AppError::SelfDelete => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::AccountDisabled => StatusCode::UNAUTHORIZED,

            AppError::Forbidden => StatusCode::FORBIDDEN,

            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Linha inexistente no banco é "não encontrado", não erro interno.
            AppError::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Validação devolve todos os detalhes, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        let error_message = match &self {
            AppError::DatabaseError(sqlx::Error::RowNotFound) => {
                "Registro não encontrado".to_string()
            }
            e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                // O log fica com a mensagem detalhada; o cliente recebe algo genérico.
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
            e => e.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validacao_vira_400() {
        let errors = validator::ValidationErrors::new();
        assert_eq!(
            AppError::ValidationError(errors).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn regras_de_negocio_viram_400() {
        assert_eq!(AppError::NonZeroStock.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotDraft.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::SelfDelete.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::AlreadyExists("SKU").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn autenticacao_e_autorizacao() {
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn nao_encontrado_vira_404() {
        assert_eq!(
            AppError::NotFound("Pedido").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn mensagem_de_conflito_nomeia_a_chave() {
        assert_eq!(AppError::AlreadyExists("SKU").to_string(), "SKU já existe");
    }
}
