// src/db/employee_repo.rs

use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::employee::{CreateEmployeePayload, SalesEmployee},
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_employee(
        &self,
        payload: &CreateEmployeePayload,
        now: NaiveDateTime,
    ) -> Result<SalesEmployee, AppError> {
        sqlx::query_as::<_, SalesEmployee>(
            r#"
            INSERT INTO sales_employees (full_name, employee_code, email, phone, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.full_name)
        .bind(&payload.employee_code)
        .bind(payload.email.as_deref())
        .bind(payload.phone.as_deref())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "Código '{}' já cadastrado.",
                        payload.employee_code
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn list_employees(&self) -> Result<Vec<SalesEmployee>, AppError> {
        let employees = sqlx::query_as::<_, SalesEmployee>(
            "SELECT * FROM sales_employees ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SalesEmployee>, AppError> {
        let employee = sqlx::query_as::<_, SalesEmployee>(
            "SELECT * FROM sales_employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn set_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Option<SalesEmployee>, AppError> {
        let employee = sqlx::query_as::<_, SalesEmployee>(
            "UPDATE sales_employees SET is_active = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }
}
