// src/db/order_repo.rs

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::lead_repo::map_employee_fk,
    models::order::{CreateOrderPayload, Order, OrderStatus},
};

/// Persistência de pedidos. `now` vem do relógio do serviço, não do banco.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn create_order(
        &self,
        order_code: &str,
        payload: &CreateOrderPayload,
        now: NaiveDateTime,
    ) -> Result<Order, AppError>;

    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError>;

    /// Só atualiza se o status atual ainda for `from` (evita corrida entre duas telas).
    async fn update_status(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        now: NaiveDateTime,
    ) -> Result<Option<Order>, AppError>;
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn create_order(
        &self,
        order_code: &str,
        payload: &CreateOrderPayload,
        now: NaiveDateTime,
    ) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                order_code, lead_id, customer_name, product_name,
                final_amount, assigned_employee_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(order_code)
        .bind(payload.lead_id)
        .bind(&payload.customer_name)
        .bind(payload.product_name.as_deref())
        .bind(payload.final_amount)
        .bind(payload.assigned_employee_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "Código de pedido '{}' repetido.",
                        order_code
                    ));
                }
                // lead_id também é FK; o vendedor é o caso comum
                if db_err.is_foreign_key_violation()
                    && db_err.constraint() == Some("orders_lead_id_fkey")
                {
                    return AppError::NotFound("lead_not_found");
                }
            }
            map_employee_fk(e)
        })
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1::order_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
        now: NaiveDateTime,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $3, updated_at = $4
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }
}
