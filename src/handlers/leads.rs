// src/handlers/leads.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::lead::{AssignLeadPayload, CreateLeadPayload, Lead},
};

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead cadastrado", body = Lead),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Vendedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .create_lead(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    responses(
        (status = 200, description = "Leads, mais recentes primeiro", body = Vec<Lead>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let leads = app_state
        .lead_service
        .list_leads()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(leads)))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 404, description = "Lead não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Lead")),
    security(("api_jwt" = []))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .get_lead(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// PATCH /api/leads/{id}/assign
#[utoipa::path(
    patch,
    path = "/api/leads/{id}/assign",
    tag = "Leads",
    request_body = AssignLeadPayload,
    responses(
        (status = 200, description = "Lead atribuído ao vendedor", body = Lead),
        (status = 404, description = "Lead ou vendedor não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Lead")),
    security(("api_jwt" = []))
)]
pub async fn assign_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignLeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .assign_lead(id, payload.employee_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// PATCH /api/leads/{id}/convert
#[utoipa::path(
    patch,
    path = "/api/leads/{id}/convert",
    tag = "Leads",
    responses(
        (status = 200, description = "Lead marcado como convertido", body = Lead),
        (status = 404, description = "Lead não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Lead")),
    security(("api_jwt" = []))
)]
pub async fn convert_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .convert_lead(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}
