// src/services/order_service.rs

use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock::Clock, error::{field_validation_error, AppError}},
    db::OrderStore,
    models::order::{CreateOrderPayload, Order, OrderStatus, StatusTransition},
};

/// Próximos status permitidos a partir de cada status. Tabela fixa.
pub fn allowed_next(status: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;

    match status {
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[InProduction, Cancelled],
        InProduction => &[Delivering, Cancelled],
        Delivering => &[Completed],
        Completed | Cancelled => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_next(from).contains(&to)
}

/// Código do pedido: `DH-<aammdd>-<6 hex maiúsculos>`.
pub fn generate_order_code(now: NaiveDateTime) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "DH-{}-{}",
        now.format("%y%m%d"),
        random[..6].to_uppercase()
    )
}

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderStore>,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderStore>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn create_order(&self, payload: CreateOrderPayload) -> Result<Order, AppError> {
        payload.validate()?;

        if payload.final_amount.is_some_and(|amount| amount < Decimal::ZERO) {
            return Err(field_validation_error("final_amount", "negative_amount"));
        }

        // Código e created_at saem do mesmo instante
        let now = self.clock.now();
        let code = generate_order_code(now);
        let order = self.repo.create_order(&code, &payload, now).await?;

        tracing::info!(order_code = %order.order_code, "Pedido criado");
        Ok(order)
    }

    pub async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
        self.repo.list_orders(status).await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Order, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("order_not_found"))
    }

    pub async fn update_status(&self, id: Uuid, next: OrderStatus) -> Result<Order, AppError> {
        let current = self.get_order(id).await?;

        if !can_transition(current.status, next) {
            return Err(AppError::InvalidStatusTransition {
                from: current.status,
                to: next,
            });
        }

        match self
            .repo
            .update_status(id, current.status, next, self.clock.now())
            .await?
        {
            Some(order) => {
                tracing::info!(
                    order_code = %order.order_code,
                    from = %current.status,
                    to = %next,
                    "Status do pedido alterado"
                );
                Ok(order)
            }
            // Alguém mudou o status entre a leitura e o UPDATE
            None => {
                let latest = self.get_order(id).await?;
                Err(AppError::InvalidStatusTransition {
                    from: latest.status,
                    to: next,
                })
            }
        }
    }

    pub fn status_transitions(&self) -> Vec<StatusTransition> {
        OrderStatus::ALL
            .iter()
            .map(|&from| StatusTransition {
                from,
                to: allowed_next(from).to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock::FixedClock;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::{str::FromStr, sync::Mutex};

    // --- Pedidos em memória ---

    #[derive(Default)]
    struct MemoryOrders {
        orders: Mutex<Vec<Order>>,
        // Se definido, outro usuário muda o status para este valor
        // logo antes do UPDATE condicional.
        concurrent_status: Option<OrderStatus>,
    }

    #[async_trait]
    impl OrderStore for MemoryOrders {
        async fn create_order(
            &self,
            order_code: &str,
            payload: &CreateOrderPayload,
            now: NaiveDateTime,
        ) -> Result<Order, AppError> {
            let order = Order {
                id: Uuid::new_v4(),
                order_code: order_code.to_string(),
                lead_id: payload.lead_id,
                customer_name: payload.customer_name.clone(),
                product_name: payload.product_name.clone(),
                status: OrderStatus::Pending,
                final_amount: payload.final_amount,
                assigned_employee_id: payload.assigned_employee_id,
                created_at: now,
                updated_at: now,
            };
            self.orders.lock().unwrap().push(order.clone());
            Ok(order)
        }

        async fn list_orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AppError> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| status.is_none_or(|s| o.status == s))
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
            Ok(self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned())
        }

        async fn update_status(
            &self,
            id: Uuid,
            from: OrderStatus,
            to: OrderStatus,
            now: NaiveDateTime,
        ) -> Result<Option<Order>, AppError> {
            let mut orders = self.orders.lock().unwrap();
            let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
                return Ok(None);
            };
            if let Some(other) = self.concurrent_status {
                order.status = other;
            }
            if order.status != from {
                return Ok(None);
            }
            order.status = to;
            order.updated_at = now;
            Ok(Some(order.clone()))
        }
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn service(store: Arc<MemoryOrders>, now: NaiveDateTime) -> OrderService {
        OrderService::new(store, Arc::new(FixedClock(now)))
    }

    fn payload(amount: Option<&str>) -> CreateOrderPayload {
        CreateOrderPayload {
            customer_name: "Công ty Bao Bì Minh Phát".into(),
            product_name: Some("Hộp carton 3 lớp".into()),
            lead_id: None,
            assigned_employee_id: None,
            final_amount: amount.map(|a| Decimal::from_str(a).unwrap()),
        }
    }

    #[tokio::test]
    async fn negative_amount_is_rejected_before_reaching_the_store() {
        let store = Arc::new(MemoryOrders::default());
        let result = service(store.clone(), at(15, 9, 0))
            .create_order(payload(Some("-1")))
            .await;

        match result {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key("final_amount"));
            }
            other => panic!("esperava erro de validação, veio {:?}", other),
        }
        assert!(store.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_customer_name_is_rejected() {
        let store = Arc::new(MemoryOrders::default());
        let mut bad = payload(None);
        bad.customer_name = "A".into();

        let result = service(store.clone(), at(15, 9, 0)).create_order(bad).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(store.orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn code_date_and_created_at_come_from_the_same_clock() {
        // Logo depois da meia-noite: data do código e created_at têm que bater
        let now = at(15, 0, 5);
        let store = Arc::new(MemoryOrders::default());

        let order = service(store, now)
            .create_order(payload(Some("12500000")))
            .await
            .unwrap();

        assert!(order.order_code.starts_with("DH-250115-"), "{}", order.order_code);
        assert_eq!(order.created_at, now);
        assert_eq!(order.updated_at, now);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn allowed_transition_updates_status_and_timestamp() {
        let store = Arc::new(MemoryOrders::default());
        let created = service(store.clone(), at(14, 16, 0))
            .create_order(payload(None))
            .await
            .unwrap();

        let later = at(15, 8, 0);
        let updated = service(store, later)
            .update_status(created.id, OrderStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert_eq!(updated.created_at, at(14, 16, 0));
        assert_eq!(updated.updated_at, later);
    }

    #[tokio::test]
    async fn transition_outside_the_table_is_a_conflict() {
        let store = Arc::new(MemoryOrders::default());
        let orders = service(store.clone(), at(15, 9, 0));
        let created = orders.create_order(payload(None)).await.unwrap();

        let result = orders.update_status(created.id, OrderStatus::Completed).await;

        assert!(matches!(
            result,
            Err(AppError::InvalidStatusTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Completed,
            })
        ));
        assert_eq!(
            orders.get_order(created.id).await.unwrap().status,
            OrderStatus::Pending
        );
    }

    #[tokio::test]
    async fn lost_race_reports_the_status_that_won() {
        let store = Arc::new(MemoryOrders {
            concurrent_status: Some(OrderStatus::Cancelled),
            ..Default::default()
        });
        let orders = service(store, at(15, 9, 0));
        let created = orders.create_order(payload(None)).await.unwrap();

        let result = orders.update_status(created.id, OrderStatus::Confirmed).await;

        assert!(matches!(
            result,
            Err(AppError::InvalidStatusTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Confirmed,
            })
        ));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let orders = service(Arc::new(MemoryOrders::default()), at(15, 9, 0));
        let result = orders.update_status(Uuid::new_v4(), OrderStatus::Confirmed).await;
        assert!(matches!(result, Err(AppError::NotFound("order_not_found"))));
    }

    #[test]
    fn happy_path_reaches_completed() {
        let path = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::InProduction,
            OrderStatus::Delivering,
            OrderStatus::Completed,
        ];
        for pair in path.windows(2) {
            assert!(can_transition(pair[0], pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn terminal_statuses_have_no_exit() {
        assert!(allowed_next(OrderStatus::Completed).is_empty());
        assert!(allowed_next(OrderStatus::Cancelled).is_empty());
        assert!(!can_transition(OrderStatus::Completed, OrderStatus::Pending));
    }

    #[test]
    fn delivering_orders_can_no_longer_be_cancelled() {
        assert!(can_transition(OrderStatus::InProduction, OrderStatus::Cancelled));
        assert!(!can_transition(OrderStatus::Delivering, OrderStatus::Cancelled));
    }

    #[test]
    fn skipping_steps_is_not_allowed() {
        assert!(!can_transition(OrderStatus::Pending, OrderStatus::Completed));
        assert!(!can_transition(OrderStatus::Pending, OrderStatus::Pending));
    }

    #[test]
    fn order_code_has_date_and_random_suffix() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 7)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let code = generate_order_code(now);
        assert!(code.starts_with("DH-250107-"), "{}", code);

        let suffix = &code["DH-250107-".len()..];
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        assert_ne!(generate_order_code(now), generate_order_code(now));
    }
}
