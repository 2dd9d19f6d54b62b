// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::{
        clock::{Clock, SystemClock},
        i18n::I18nStore,
    },
    db::{DashboardRepository, EmployeeRepository, LeadRepository, OrderRepository, UserRepository},
    services::{
        auth::AuthService, dashboard_service::DashboardService, employee_service::EmployeeService,
        lead_service::LeadService, order_service::OrderService,
    },
};

/// Parâmetros do dashboard que antes eram literais no código.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Meta de faturamento de cada vendedor (VND)
    pub kpi_revenue_target: Decimal,
    /// Meta diária exibida no card de faturamento
    pub daily_revenue_target: Decimal,
    /// Dias no gráfico, incluindo hoje
    pub chart_days: u32,
    /// Janela da média móvel
    pub moving_average_window: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            kpi_revenue_target: Decimal::from(40_000_000),
            daily_revenue_target: Decimal::from(10_000_000),
            chart_days: 7,
            moving_average_window: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub server_addr: String,
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `from_env` para dar pra testar sem mexer no ambiente do processo
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("{} deve ser definida", key))
        };

        let defaults = DashboardSettings::default();

        let kpi_revenue_target =
            parse_or(&lookup, "KPI_REVENUE_TARGET", defaults.kpi_revenue_target)?;
        let daily_revenue_target =
            parse_or(&lookup, "DAILY_REVENUE_TARGET", defaults.daily_revenue_target)?;

        if kpi_revenue_target <= Decimal::ZERO {
            return Err(anyhow!("KPI_REVENUE_TARGET deve ser maior que zero"));
        }
        if daily_revenue_target < Decimal::ZERO {
            return Err(anyhow!("DAILY_REVENUE_TARGET não pode ser negativa"));
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            jwt_secret: required("JWT_SECRET")?,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            dashboard: DashboardSettings {
                kpi_revenue_target,
                daily_revenue_target,
                ..defaults
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Valor inválido para {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

// O estado compartilhado por todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub lead_service: LeadService,
    pub order_service: OrderService,
    pub employee_service: EmployeeService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let i18n_store = Arc::new(I18nStore::load()?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        // --- Monta o gráfico de dependências ---
        let auth_service = AuthService::new(
            UserRepository::new(db_pool.clone()),
            config.jwt_secret.clone(),
        );
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        // Todas as datas gravadas e os filtros do dashboard usam o mesmo relógio
        let lead_service = LeadService::new(
            LeadRepository::new(db_pool.clone()),
            employee_repo.clone(),
            clock.clone(),
        );
        let order_service = OrderService::new(
            Arc::new(OrderRepository::new(db_pool.clone())),
            clock.clone(),
        );
        let employee_service = EmployeeService::new(employee_repo, clock.clone());
        let dashboard_service = DashboardService::new(
            Arc::new(DashboardRepository::new(db_pool.clone())),
            clock,
            config.dashboard.clone(),
        );

        Ok(Self {
            db_pool,
            i18n_store,
            auth_service,
            lead_service,
            order_service,
            employee_service,
            dashboard_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/crm"),
            ("JWT_SECRET", "segredo"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.dashboard, DashboardSettings::default());
        assert_eq!(config.dashboard.kpi_revenue_target, Decimal::from(40_000_000));
        assert_eq!(config.dashboard.chart_days, 7);
        assert_eq!(config.dashboard.moving_average_window, 3);
    }

    #[test]
    fn targets_can_be_overridden() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/crm"),
            ("JWT_SECRET", "segredo"),
            ("KPI_REVENUE_TARGET", "55000000"),
            ("DAILY_REVENUE_TARGET", "2500000.50"),
        ]))
        .unwrap();

        assert_eq!(config.dashboard.kpi_revenue_target, Decimal::from(55_000_000));
        assert_eq!(
            config.dashboard.daily_revenue_target,
            Decimal::from_str("2500000.50").unwrap()
        );
    }

    #[test]
    fn missing_jwt_secret_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/crm")]))
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn zero_or_garbage_target_is_rejected() {
        let zero = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/crm"),
            ("JWT_SECRET", "segredo"),
            ("KPI_REVENUE_TARGET", "0"),
        ]));
        assert!(zero.is_err());

        let garbage = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/crm"),
            ("JWT_SECRET", "segredo"),
            ("KPI_REVENUE_TARGET", "muito"),
        ]));
        assert!(garbage.unwrap_err().to_string().contains("KPI_REVENUE_TARGET"));
    }
}
