// src/models/order.rs

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE order_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    InProduction,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::InProduction,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProduction => "in_production",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(example = "DH-250117-7F3A9C")]
    pub order_code: String,
    pub lead_id: Option<Uuid>,
    #[schema(example = "Công ty Bao Bì Minh Phát")]
    pub customer_name: String,
    #[schema(example = "Hộp carton 3 lớp in 4 màu")]
    pub product_name: Option<String>,
    pub status: OrderStatus,
    // Pode vir nulo do banco; nas somas conta como zero
    #[schema(example = "12500000")]
    pub final_amount: Option<Decimal>,
    pub assigned_employee_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 2, max = 160, message = "customer_name_length"))]
    #[schema(example = "Công ty Bao Bì Minh Phát")]
    pub customer_name: String,

    #[validate(length(max = 200, message = "product_name_length"))]
    pub product_name: Option<String>,

    pub lead_id: Option<Uuid>,

    pub assigned_employee_id: Option<Uuid>,

    #[schema(example = "12500000")]
    pub final_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "confirmed")]
    pub status: OrderStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersQuery {
    /// Filtra pelo status (ex: `pending`)
    pub status: Option<OrderStatus>,
}

// Uma linha da tabela de transições (para os dropdowns do frontend)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    pub from: OrderStatus,
    pub to: Vec<OrderStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateOrderPayload {
        CreateOrderPayload {
            customer_name: "Công ty Bao Bì Minh Phát".into(),
            product_name: Some("Túi giấy kraft".into()),
            lead_id: None,
            assigned_employee_id: None,
            final_amount: Some(Decimal::from(12_500_000)),
        }
    }

    #[test]
    fn complete_order_is_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn customer_name_must_have_2_to_160_chars() {
        let short = CreateOrderPayload { customer_name: "X".into(), ..valid() };
        let long = CreateOrderPayload { customer_name: "x".repeat(161), ..valid() };

        assert!(short.validate().unwrap_err().field_errors().contains_key("customer_name"));
        assert!(long.validate().unwrap_err().field_errors().contains_key("customer_name"));
    }

    #[test]
    fn product_name_is_capped_at_200_chars() {
        let long = CreateOrderPayload { product_name: Some("p".repeat(201)), ..valid() };
        assert!(long.validate().unwrap_err().field_errors().contains_key("product_name"));
    }

    #[test]
    fn status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InProduction).unwrap(),
            "\"in_production\""
        );
        let parsed: UpdateOrderStatusPayload =
            serde_json::from_str(r#"{"status":"delivering"}"#).unwrap();
        assert_eq!(parsed.status, OrderStatus::Delivering);
    }
}
