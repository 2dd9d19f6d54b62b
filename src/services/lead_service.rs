// src/services/lead_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{EmployeeRepository, LeadRepository},
    models::lead::{CreateLeadPayload, Lead},
};

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    employee_repo: EmployeeRepository,
    clock: Arc<dyn Clock>,
}

impl LeadService {
    pub fn new(
        repo: LeadRepository,
        employee_repo: EmployeeRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            employee_repo,
            clock,
        }
    }

    pub async fn create_lead(&self, payload: CreateLeadPayload) -> Result<Lead, AppError> {
        payload.validate()?;

        let lead = self.repo.create_lead(&payload, self.clock.now()).await?;
        tracing::info!(lead_id = %lead.id, source = ?lead.source, "Lead recebido");
        Ok(lead)
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        self.repo.list_leads().await
    }

    pub async fn get_lead(&self, id: Uuid) -> Result<Lead, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("lead_not_found"))
    }

    pub async fn assign_lead(&self, id: Uuid, employee_id: Uuid) -> Result<Lead, AppError> {
        // Vendedor inativo também pode receber lead; só precisa existir
        self.employee_repo
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::NotFound("employee_not_found"))?;

        self.repo
            .assign_employee(id, employee_id, self.clock.now())
            .await?
            .ok_or(AppError::NotFound("lead_not_found"))
    }

    pub async fn convert_lead(&self, id: Uuid) -> Result<Lead, AppError> {
        let lead = self
            .repo
            .mark_converted(id, self.clock.now())
            .await?
            .ok_or(AppError::NotFound("lead_not_found"))?;

        tracing::info!(lead_id = %lead.id, "Lead convertido");
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::clock::FixedClock;
    use chrono::NaiveDate;
    use sqlx::PgPool;

    // Pool preguiçoso: nenhum teste aqui chega a abrir conexão
    fn service() -> LeadService {
        let pool = PgPool::connect_lazy("postgres://localhost/crm_test").unwrap();
        let now = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        LeadService::new(
            LeadRepository::new(pool.clone()),
            EmployeeRepository::new(pool),
            Arc::new(FixedClock(now)),
        )
    }

    #[tokio::test]
    async fn invalid_lead_is_rejected_before_the_database() {
        let payload = CreateLeadPayload {
            full_name: "A".into(),
            phone: Some("123".into()),
            email: Some("sem-arroba".into()),
            source: Some("zalo".into()),
            note: None,
            assigned_employee_id: None,
        };

        match service().create_lead(payload).await {
            Err(AppError::ValidationError(errors)) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("full_name"));
                assert!(fields.contains_key("phone"));
                assert!(fields.contains_key("email"));
                assert!(!fields.contains_key("source"));
            }
            other => panic!("esperava erro de validação, veio {:?}", other),
        }
    }
}
