// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::{ChartPoint, DashboardMetrics, EmployeeKpi, EmployeeRanking},
};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais de leads, pedidos, faturamento e CSKH", body = DashboardMetrics),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let metrics = app_state
        .dashboard_service
        .compute_overall_metrics()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(metrics)))
}

// GET /api/dashboard/employee-kpis
#[utoipa::path(
    get,
    path = "/api/dashboard/employee-kpis",
    tag = "Dashboard",
    responses(
        (status = 200, description = "KPI de cada vendedor ativo", body = Vec<EmployeeKpi>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee_kpis(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let kpis = app_state
        .dashboard_service
        .compute_employee_kpis()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(kpis)))
}

// GET /api/dashboard/chart-data
#[utoipa::path(
    get,
    path = "/api/dashboard/chart-data",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Leads e pedidos dos últimos 7 dias com média móvel de 3 dias", body = Vec<ChartPoint>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_chart_data(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let chart = app_state
        .dashboard_service
        .compute_chart_series()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/employee-ranking
#[utoipa::path(
    get,
    path = "/api/dashboard/employee-ranking",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Top 3 e bottom 3 vendedores por faturamento", body = EmployeeRanking),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee_ranking(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let ranking = app_state
        .dashboard_service
        .compute_employee_ranking()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ranking)))
}
