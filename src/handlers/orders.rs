// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::order::{
        CreateOrderPayload, ListOrdersQuery, Order, StatusTransition, UpdateOrderStatusPayload,
    },
};

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com código gerado", body = Order),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Lead ou vendedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .create_order(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders?status=pending
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Pedidos, mais recentes primeiro", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list_orders(query.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/status-transitions
#[utoipa::path(
    get,
    path = "/api/orders/status-transitions",
    tag = "Orders",
    responses(
        (status = 200, description = "Tabela fixa de transições de status", body = Vec<StatusTransition>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_status_transitions(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.order_service.status_transitions()))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedido", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(("id" = Uuid, Path, description = "ID do Pedido")),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .get_order(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// PATCH /api/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Transição não permitida")
    ),
    params(("id" = Uuid, Path, description = "ID do Pedido")),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .update_status(id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}
