// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::User,
};

// Exige `Authorization: Bearer <jwt>` e deixa o usuário nas extensions
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());

    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>() else {
        return Err(AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store));
    };

    let user = app_state
        .auth_service
        .validate_token(bearer.token())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator do usuário autenticado (depende do auth_guard na rota)
pub struct AuthenticatedUser(pub User);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| {
                let locale = Locale::from_headers(&parts.headers);
                AppError::InvalidToken.to_api_error(&locale, &state.i18n_store)
            })
    }
}
