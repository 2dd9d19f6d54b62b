// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, LoginUserPayload, RegisterUserPayload, User},
};

const TOKEN_TTL_DAYS: i64 = 7;

// Emissão e verificação de JWT (HS256). Não toca no banco.
#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
}

impl JwtKeys {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            keys: JwtKeys::new(jwt_secret),
        }
    }

    pub async fn register_user(&self, payload: RegisterUserPayload) -> Result<String, AppError> {
        payload.validate()?;

        // bcrypt é caro: roda fora do executor
        let password_clone = payload.password;
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .user_repo
            .create_user(&payload.email, &hashed_password)
            .await?;
        tracing::info!(user_id = %user.id, "Usuário registrado");

        self.keys.issue(user.id)
    }

    pub async fn login_user(&self, payload: LoginUserPayload) -> Result<String, AppError> {
        payload.validate()?;

        let user = self
            .user_repo
            .find_by_email(&payload.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = payload.password;
        let password_hash_clone = user.password_hash.clone();

        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.keys.issue(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.keys.verify(token)?;

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let keys = JwtKeys::new("segredo-de-teste".into());
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, (TOKEN_TTL_DAYS * 24 * 60 * 60) as usize);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = JwtKeys::new("um".into()).issue(Uuid::new_v4()).unwrap();
        let result = JwtKeys::new("outro".into()).verify(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn malformed_register_payload_never_reaches_the_database() {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/crm_test").unwrap();
        let service = AuthService::new(UserRepository::new(pool), "segredo".into());

        let result = service
            .register_user(RegisterUserPayload {
                email: "sem-arroba".into(),
                password: "123".into(),
            })
            .await;

        match result {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key("email"));
                assert!(errors.field_errors().contains_key("password"));
            }
            other => panic!("esperava erro de validação, veio {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn garbage_token_is_rejected() {
        let result = JwtKeys::new("segredo".into()).verify("isso.nao.e-um-jwt");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
