// src/db/lead_repo.rs

use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{CreateLeadPayload, Lead},
};

#[derive(Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_lead(
        &self,
        payload: &CreateLeadPayload,
        now: NaiveDateTime,
    ) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (
                full_name, phone, email, source, note, assigned_employee_id,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.full_name)
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.source.as_deref())
        .bind(payload.note.as_deref())
        .bind(payload.assigned_employee_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_employee_fk)
    }

    /// Mais recentes primeiro
    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(leads)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    pub async fn assign_employee(
        &self,
        id: Uuid,
        employee_id: Uuid,
        now: NaiveDateTime,
    ) -> Result<Option<Lead>, AppError> {
        sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET assigned_employee_id = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(employee_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_employee_fk)
    }

    // Idempotente: converter duas vezes não muda nada além do updated_at
    pub async fn mark_converted(
        &self,
        id: Uuid,
        now: NaiveDateTime,
    ) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET is_converted = TRUE, updated_at = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(lead)
    }
}

// FK de vendedor inexistente vira 404 em vez de 500
pub(crate) fn map_employee_fk(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound("employee_not_found");
        }
    }
    e.into()
}
