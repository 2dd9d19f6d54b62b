// src/models/employee.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesEmployee {
    pub id: Uuid,
    #[schema(example = "Trần Thị Bình")]
    pub full_name: String,
    #[schema(example = "NV001")]
    pub employee_code: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 2, max = 120, message = "full_name_length"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 32, message = "employee_code_length"))]
    #[schema(example = "NV001")]
    pub employee_code: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 20, message = "phone_length"))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetEmployeeActivePayload {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateEmployeePayload {
        CreateEmployeePayload {
            full_name: "Trần Thị Bình".into(),
            employee_code: "NV001".into(),
            email: Some("binh.tran@inbaobi.vn".into()),
            phone: Some("0912345678".into()),
        }
    }

    #[test]
    fn complete_employee_is_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn employee_code_must_be_1_to_32_chars() {
        let empty = CreateEmployeePayload { employee_code: String::new(), ..valid() };
        let long = CreateEmployeePayload { employee_code: "N".repeat(33), ..valid() };
        let max = CreateEmployeePayload { employee_code: "N".repeat(32), ..valid() };

        assert!(empty.validate().unwrap_err().field_errors().contains_key("employee_code"));
        assert!(long.validate().unwrap_err().field_errors().contains_key("employee_code"));
        assert!(max.validate().is_ok());
    }

    #[test]
    fn name_phone_and_email_are_checked() {
        let bad = CreateEmployeePayload {
            full_name: "B".into(),
            employee_code: "NV002".into(),
            email: Some("binh".into()),
            phone: Some("0912".into()),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 3);
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
    }
}
