// src/db/dashboard_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{ActivityFilter, EmployeeActivity},
        employee::SalesEmployee,
        lead::Lead,
        order::Order,
    },
};

/// O que o dashboard precisa do banco: contar, somar e buscar vendedores
/// com seus leads/pedidos. Só leitura.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn count_leads(&self, filter: &ActivityFilter) -> Result<i64, AppError>;

    async fn count_orders(&self, filter: &ActivityFilter) -> Result<i64, AppError>;

    /// Soma de `final_amount`; nulos contam como zero.
    async fn sum_order_amounts(&self, filter: &ActivityFilter) -> Result<Decimal, AppError>;

    /// Vendedores ativos, na ordem do banco, com leads e pedidos carregados.
    async fn active_employees_with_activity(&self) -> Result<Vec<EmployeeActivity>, AppError>;
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardSource for DashboardRepository {
    async fn count_leads(&self, filter: &ActivityFilter) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM leads
            WHERE ($1::timestamp IS NULL OR created_at >= $1)
              AND ($2::timestamp IS NULL OR created_at < $2)
              AND ($3::boolean IS NULL OR is_converted = $3)
            "#,
        )
        .bind(filter.created_from)
        .bind(filter.created_before)
        .bind(filter.converted)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn count_orders(&self, filter: &ActivityFilter) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE ($1::timestamp IS NULL OR created_at >= $1)
              AND ($2::timestamp IS NULL OR created_at < $2)
              AND ($3::order_status IS NULL OR status = $3)
            "#,
        )
        .bind(filter.created_from)
        .bind(filter.created_before)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn sum_order_amounts(&self, filter: &ActivityFilter) -> Result<Decimal, AppError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(final_amount), 0)
            FROM orders
            WHERE ($1::timestamp IS NULL OR created_at >= $1)
              AND ($2::timestamp IS NULL OR created_at < $2)
              AND ($3::order_status IS NULL OR status = $3)
            "#,
        )
        .bind(filter.created_from)
        .bind(filter.created_before)
        .bind(filter.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn active_employees_with_activity(&self) -> Result<Vec<EmployeeActivity>, AppError> {
        let employees = sqlx::query_as::<_, SalesEmployee>(
            r#"
            SELECT * FROM sales_employees
            WHERE is_active = TRUE
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = employees.iter().map(|e| e.id).collect();

        // Carrega as duas coleções de uma vez, em paralelo
        let (leads, orders) = tokio::try_join!(
            sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE assigned_employee_id = ANY($1)")
                .bind(&ids[..])
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE assigned_employee_id = ANY($1)")
                .bind(&ids[..])
                .fetch_all(&self.pool),
        )?;

        let mut leads_by_employee: HashMap<Uuid, Vec<Lead>> = HashMap::new();
        for lead in leads {
            if let Some(employee_id) = lead.assigned_employee_id {
                leads_by_employee.entry(employee_id).or_default().push(lead);
            }
        }

        let mut orders_by_employee: HashMap<Uuid, Vec<Order>> = HashMap::new();
        for order in orders {
            if let Some(employee_id) = order.assigned_employee_id {
                orders_by_employee.entry(employee_id).or_default().push(order);
            }
        }

        let activity = employees
            .into_iter()
            .map(|employee| EmployeeActivity {
                leads: leads_by_employee.remove(&employee.id).unwrap_or_default(),
                orders: orders_by_employee.remove(&employee.id).unwrap_or_default(),
                employee,
            })
            .collect();

        Ok(activity)
    }
}
