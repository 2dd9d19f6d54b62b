// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    common::i18n::I18nStore,
    middleware::i18n::Locale,
    models::order::OrderStatus,
};

// Erros de domínio. Os handlers nunca devolvem isso direto: convertem para
// `ApiError` com a mensagem no idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // A string é a chave de tradução (ex: "lead_not_found")
    #[error("Registro não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    // Falha do banco (conexão perdida, constraint, etc). Vira 500.
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que sai pela API (já traduzido)
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl AppError {
    /// Traduz o erro para o idioma pedido no `Accept-Language`.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    // `message` do derive é chave de tradução; sem ela, usa o código
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let key = e.message.as_deref().unwrap_or(&e.code);
                            store.translate(lang, key)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: store.translate(lang, "validation_failed"),
                    details: Some(details),
                }
            }
            AppError::EmailAlreadyExists => {
                ApiError::new(StatusCode::CONFLICT, store.translate(lang, "email_already_exists"))
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, store.translate(lang, "invalid_credentials"))
            }
            AppError::InvalidToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, store.translate(lang, "invalid_token"))
            }
            AppError::UserNotFound => {
                ApiError::new(StatusCode::NOT_FOUND, store.translate(lang, "user_not_found"))
            }
            AppError::NotFound(key) => ApiError::new(StatusCode::NOT_FOUND, store.translate(lang, key)),
            AppError::UniqueConstraintViolation(detail) => {
                tracing::warn!("Violação de unicidade: {}", detail);
                ApiError::new(StatusCode::CONFLICT, store.translate(lang, "unique_violation"))
            }
            AppError::InvalidStatusTransition { from, to } => {
                let message = store
                    .translate(lang, "invalid_status_transition")
                    .replace("{from}", from.as_str())
                    .replace("{to}", to.as_str());
                ApiError::new(StatusCode::CONFLICT, message)
            }
            // Banco, anyhow, bcrypt e JWT: 500 genérico, detalhe só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    store.translate(lang, "internal_error"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Atalho para erros de validação montados à mão (fora do derive)
pub fn field_validation_error(field: &'static str, code: &'static str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, validator::ValidationError::new(code));
    AppError::ValidationError(errors)
}
