// src/handlers/employees.rs

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
    models::employee::{CreateEmployeePayload, SalesEmployee, SetEmployeeActivePayload},
};

// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Vendedor cadastrado", body = SalesEmployee),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Código de vendedor já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .create_employee(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "Todos os vendedores", body = Vec<SalesEmployee>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .employee_service
        .list_employees()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employees)))
}

// PATCH /api/employees/{id}/active
#[utoipa::path(
    patch,
    path = "/api/employees/{id}/active",
    tag = "Employees",
    request_body = SetEmployeeActivePayload,
    responses(
        (status = 200, description = "Vendedor ativado/desativado", body = SalesEmployee),
        (status = 404, description = "Vendedor não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Vendedor")),
    security(("api_jwt" = []))
)]
pub async fn set_employee_active(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetEmployeeActivePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .employee_service
        .set_active(id, payload.is_active)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employee)))
}
