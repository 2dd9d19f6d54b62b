// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use crate::{
    common::{clock::Clock, error::AppError},
    config::DashboardSettings,
    db::DashboardSource,
    models::{
        dashboard::{
            ActivityFilter, ChartPoint, CustomerServiceTotals, DashboardMetrics, EmployeeActivity,
            EmployeeKpi, EmployeeRanking, LeadTotals, OrderTotals, RevenueTotals,
        },
        order::OrderStatus,
    },
};

/// Rótulos dos dias da semana em vietnamita, indexados a partir do domingo.
pub const WEEKDAY_LABELS: [&str; 7] = ["CN", "T2", "T3", "T4", "T5", "T6", "T7"];

const RANKING_SIZE: usize = 3;

// Agregador do dashboard. Sem estado próprio: tudo é recalculado a cada chamada.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DashboardSource>,
    clock: Arc<dyn Clock>,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn DashboardSource>,
        clock: Arc<dyn Clock>,
        settings: DashboardSettings,
    ) -> Self {
        Self { source, clock, settings }
    }

    // 1. Cards do topo
    pub async fn compute_overall_metrics(&self) -> Result<DashboardMetrics, AppError> {
        let today_start = start_of_day(self.clock.today());

        let all = ActivityFilter::default();
        let since_today = ActivityFilter::created_since(today_start);
        let converted = ActivityFilter::converted();
        let completed = ActivityFilter::with_status(OrderStatus::Completed);

        let (
            total_leads,
            today_leads,
            converted_leads,
            total_orders,
            today_orders,
            completed_orders,
            total_revenue,
        ) = tokio::try_join!(
            self.source.count_leads(&all),
            self.source.count_leads(&since_today),
            self.source.count_leads(&converted),
            self.source.count_orders(&all),
            self.source.count_orders(&since_today),
            self.source.count_orders(&completed),
            self.source.sum_order_amounts(&all),
        )?;

        Ok(DashboardMetrics {
            leads: LeadTotals {
                total: total_leads,
                today: today_leads,
                converted: converted_leads,
            },
            orders: OrderTotals {
                total: total_orders,
                today: today_orders,
                completed: completed_orders,
            },
            revenue: RevenueTotals {
                total: total_revenue,
                // Faturamento do dia ainda não é calculado
                today: Decimal::ZERO,
                target: self.settings.daily_revenue_target,
            },
            // CSKH ainda não tem fonte de dados
            customer_service: CustomerServiceTotals::default(),
        })
    }

    // 2. KPI por vendedor ativo, na ordem em que o banco devolveu
    pub async fn compute_employee_kpis(&self) -> Result<Vec<EmployeeKpi>, AppError> {
        let activity = self.source.active_employees_with_activity().await?;

        let kpis: Vec<EmployeeKpi> = activity
            .iter()
            .map(|a| employee_kpi(a, self.settings.kpi_revenue_target))
            .collect();

        tracing::debug!(employees = kpis.len(), "KPIs calculados");
        Ok(kpis)
    }

    // 3. Série dos últimos N dias (incluindo hoje), do mais antigo ao mais novo
    pub async fn compute_chart_series(&self) -> Result<Vec<ChartPoint>, AppError> {
        let today = self.clock.today();
        let days = self.settings.chart_days.max(1);

        let mut daily = Vec::with_capacity(days as usize);
        for offset in (0..days).rev() {
            let date = today - Duration::days(i64::from(offset));
            let day_start = start_of_day(date);
            let window = ActivityFilter::created_between(day_start, day_start + Duration::days(1));

            let (leads, orders) = tokio::try_join!(
                self.source.count_leads(&window),
                self.source.count_orders(&window),
            )?;
            daily.push((date, leads, orders));
        }

        let lead_counts: Vec<i64> = daily.iter().map(|&(_, leads, _)| leads).collect();
        let order_counts: Vec<i64> = daily.iter().map(|&(_, _, orders)| orders).collect();
        let leads_avg = moving_average(&lead_counts, self.settings.moving_average_window);
        let orders_avg = moving_average(&order_counts, self.settings.moving_average_window);

        let points = daily
            .into_iter()
            .enumerate()
            .map(|(i, (date, leads, orders))| ChartPoint {
                day: weekday_label(date).to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                leads,
                orders,
                leads_moving_avg: leads_avg[i],
                orders_moving_avg: orders_avg[i],
            })
            .collect();

        Ok(points)
    }

    // 4. Top 3 e bottom 3 por faturamento
    pub async fn compute_employee_ranking(&self) -> Result<EmployeeRanking, AppError> {
        let kpis = self.compute_employee_kpis().await?;
        Ok(rank_by_revenue(kpis))
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn employee_kpi(activity: &EmployeeActivity, target: Decimal) -> EmployeeKpi {
    let lead_count = activity.leads.len() as i64;
    let order_count = activity.orders.len() as i64;
    let revenue: Decimal = activity
        .orders
        .iter()
        .map(|o| o.final_amount.unwrap_or(Decimal::ZERO))
        .sum();

    EmployeeKpi {
        id: activity.employee.id,
        name: activity.employee.full_name.clone(),
        employee_code: activity.employee.employee_code.clone(),
        lead_count,
        order_count,
        avg_processing_time: None,
        conversion_rate: conversion_rate(lead_count, order_count),
        customer_service_count: order_count / 2,
        revenue,
        target,
        progress_percent: progress_percent(revenue, target),
    }
}

/// Pedidos / leads * 100 com uma casa; zero quando não há leads.
pub(crate) fn conversion_rate(leads: i64, orders: i64) -> f64 {
    if leads <= 0 {
        return 0.0;
    }
    round_one_decimal(orders as f64 / leads as f64 * 100.0)
}

/// Faturamento / meta * 100, limitado a 100, arredondado (0.5 sobe).
pub(crate) fn progress_percent(revenue: Decimal, target: Decimal) -> u32 {
    if target <= Decimal::ZERO {
        return 0;
    }
    (revenue * Decimal::ONE_HUNDRED / target)
        .min(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Média móvel para trás: o ponto `i` usa `max(0, i - window + 1)..=i`.
pub(crate) fn moving_average(values: &[i64], window: usize) -> Vec<f64> {
    let window = window.max(1);

    (0..values.len())
        .map(|i| {
            let slice = &values[(i + 1).saturating_sub(window)..=i];
            round_one_decimal(slice.iter().sum::<i64>() as f64 / slice.len() as f64)
        })
        .collect()
}

// Ordenação estável: empates mantêm a ordem de entrada.
pub(crate) fn rank_by_revenue(mut kpis: Vec<EmployeeKpi>) -> EmployeeRanking {
    kpis.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    EmployeeRanking {
        top3: kpis.iter().take(RANKING_SIZE).cloned().collect(),
        bottom3: kpis.iter().rev().take(RANKING_SIZE).cloned().collect(),
    }
}
