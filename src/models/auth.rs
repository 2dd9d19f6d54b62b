// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "sale@inbaobi.vn")]
    pub email: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "sale@inbaobi.vn")]
    pub email: String,
    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Claims do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // ID do usuário
    pub exp: usize, // Expira em
    pub iat: usize, // Emitido em
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_email_and_six_char_password() {
        let ok = RegisterUserPayload {
            email: "sale@inbaobi.vn".into(),
            password: "123456".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterUserPayload {
            email: "sale".into(),
            password: "12345".into(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
