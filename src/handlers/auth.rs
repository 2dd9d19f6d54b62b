// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, User},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let token = app_state
        .auth_service
        .register_user(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let token = app_state
        .auth_service
        .login_user(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário logado", body = User),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
