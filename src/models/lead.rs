// src/models/lead.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    #[schema(example = "Nguyễn Văn An")]
    pub full_name: String,
    #[schema(example = "0901234567")]
    pub phone: Option<String>,
    pub email: Option<String>,
    // Canal de origem (facebook, zalo, website...)
    #[schema(example = "zalo")]
    pub source: Option<String>,
    pub note: Option<String>,
    pub is_converted: bool,
    pub assigned_employee_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 2, max = 120, message = "full_name_length"))]
    #[schema(example = "Nguyễn Văn An")]
    pub full_name: String,

    #[validate(length(min = 8, max = 20, message = "phone_length"))]
    #[schema(example = "0901234567")]
    pub phone: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(max = 60, message = "source_length"))]
    pub source: Option<String>,

    pub note: Option<String>,

    pub assigned_employee_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignLeadPayload {
    pub employee_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateLeadPayload {
        CreateLeadPayload {
            full_name: "Nguyễn Văn An".into(),
            phone: Some("0901234567".into()),
            email: Some("an.nguyen@gmail.com".into()),
            source: Some("facebook".into()),
            note: None,
            assigned_employee_id: None,
        }
    }

    #[test]
    fn complete_lead_is_valid() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn optional_contact_fields_may_be_absent() {
        let lead = CreateLeadPayload {
            phone: None,
            email: None,
            source: None,
            ..valid()
        };
        assert!(lead.validate().is_ok());
    }

    #[test]
    fn full_name_bounds_are_inclusive() {
        let shortest = CreateLeadPayload { full_name: "An".into(), ..valid() };
        let longest = CreateLeadPayload { full_name: "a".repeat(120), ..valid() };
        let too_short = CreateLeadPayload { full_name: "A".into(), ..valid() };
        let too_long = CreateLeadPayload { full_name: "a".repeat(121), ..valid() };

        assert!(shortest.validate().is_ok());
        assert!(longest.validate().is_ok());
        assert!(too_short.validate().unwrap_err().field_errors().contains_key("full_name"));
        assert!(too_long.validate().unwrap_err().field_errors().contains_key("full_name"));
    }

    #[test]
    fn phone_must_have_8_to_20_chars() {
        let ok = CreateLeadPayload { phone: Some("12345678".into()), ..valid() };
        let short = CreateLeadPayload { phone: Some("1234567".into()), ..valid() };
        let long = CreateLeadPayload { phone: Some("1".repeat(21)), ..valid() };

        assert!(ok.validate().is_ok());
        assert!(short.validate().unwrap_err().field_errors().contains_key("phone"));
        assert!(long.validate().unwrap_err().field_errors().contains_key("phone"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let lead = CreateLeadPayload { email: Some("an.nguyen".into()), ..valid() };
        let errors = lead.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["email"][0].message.as_deref(), Some("invalid_email"));
    }
}
