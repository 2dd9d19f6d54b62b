// src/services/employee_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{clock::Clock, error::AppError},
    db::EmployeeRepository,
    models::employee::{CreateEmployeePayload, SalesEmployee},
};

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
    clock: Arc<dyn Clock>,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn create_employee(
        &self,
        payload: CreateEmployeePayload,
    ) -> Result<SalesEmployee, AppError> {
        payload.validate()?;
        self.repo.create_employee(&payload, self.clock.now()).await
    }

    pub async fn list_employees(&self) -> Result<Vec<SalesEmployee>, AppError> {
        self.repo.list_employees().await
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<SalesEmployee, AppError> {
        self.repo
            .set_active(id, is_active)
            .await?
            .ok_or(AppError::NotFound("employee_not_found"))
    }
}
