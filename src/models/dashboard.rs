// src/models/dashboard.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{employee::SalesEmployee, lead::Lead, order::{Order, OrderStatus}};

// --- Entrada: o que o dashboard lê do banco ---

/// Predicado das contagens/somas. `None` = sem filtro naquele campo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    /// Inclusivo
    pub created_from: Option<NaiveDateTime>,
    /// Exclusivo
    pub created_before: Option<NaiveDateTime>,
    /// Só para leads
    pub converted: Option<bool>,
    /// Só para pedidos
    pub status: Option<OrderStatus>,
}

impl ActivityFilter {
    pub fn created_since(from: NaiveDateTime) -> Self {
        Self { created_from: Some(from), ..Default::default() }
    }

    pub fn created_between(from: NaiveDateTime, before: NaiveDateTime) -> Self {
        Self {
            created_from: Some(from),
            created_before: Some(before),
            ..Default::default()
        }
    }

    pub fn converted() -> Self {
        Self { converted: Some(true), ..Default::default() }
    }

    pub fn with_status(status: OrderStatus) -> Self {
        Self { status: Some(status), ..Default::default() }
    }
}

/// Vendedor ativo com leads e pedidos já carregados.
#[derive(Debug, Clone)]
pub struct EmployeeActivity {
    pub employee: SalesEmployee,
    pub leads: Vec<Lead>,
    pub orders: Vec<Order>,
}

// --- Saída: 1. Cards do topo ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub leads: LeadTotals,
    pub orders: OrderTotals,
    pub revenue: RevenueTotals,
    pub customer_service: CustomerServiceTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadTotals {
    pub total: i64,
    pub today: i64,
    pub converted: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub total: i64,
    pub today: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTotals {
    pub total: Decimal,
    /// Ainda não calculado: sempre zero.
    pub today: Decimal,
    /// Meta diária configurada
    pub target: Decimal,
}

/// CSKH (chăm sóc khách hàng). Ainda não ligado a dados reais: tudo zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerServiceTotals {
    pub total: i64,
    pub today: i64,
    pub resolved: i64,
}

// --- 2. KPI por vendedor ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeKpi {
    pub id: uuid::Uuid,
    pub name: String,
    pub employee_code: String,
    pub lead_count: i64,
    pub order_count: i64,
    /// Tempo médio de processamento em minutos. Não existe fonte de dados
    /// para isso ainda, então fica sempre `null`.
    pub avg_processing_time: Option<u32>,
    /// Pedidos / leads * 100, uma casa decimal
    pub conversion_rate: f64,
    /// Estimativa: metade dos pedidos
    pub customer_service_count: i64,
    pub revenue: Decimal,
    pub target: Decimal,
    /// 0..=100
    pub progress_percent: u32,
}

// --- 3. Gráfico de 7 dias ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[schema(example = "T2")]
    pub day: String,
    #[schema(example = "2025-01-13")]
    pub date: String,
    pub leads: i64,
    pub orders: i64,
    pub leads_moving_avg: f64,
    pub orders_moving_avg: f64,
}

// --- 4. Ranking ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRanking {
    pub top3: Vec<EmployeeKpi>,
    /// Pior vendedor primeiro
    pub bottom3: Vec<EmployeeKpi>,
}
