// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_metrics,
        handlers::dashboard::get_employee_kpis,
        handlers::dashboard::get_chart_data,
        handlers::dashboard::get_employee_ranking,

        // --- Leads ---
        handlers::leads::create_lead,
        handlers::leads::list_leads,
        handlers::leads::get_lead,
        handlers::leads::assign_lead,
        handlers::leads::convert_lead,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_status_transitions,
        handlers::orders::get_order,
        handlers::orders::update_order_status,

        // --- Employees ---
        handlers::employees::create_employee,
        handlers::employees::list_employees,
        handlers::employees::set_employee_active,
    ),
    components(
        schemas(
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            models::dashboard::DashboardMetrics,
            models::dashboard::LeadTotals,
            models::dashboard::OrderTotals,
            models::dashboard::RevenueTotals,
            models::dashboard::CustomerServiceTotals,
            models::dashboard::EmployeeKpi,
            models::dashboard::ChartPoint,
            models::dashboard::EmployeeRanking,

            models::lead::Lead,
            models::lead::CreateLeadPayload,
            models::lead::AssignLeadPayload,

            models::order::Order,
            models::order::OrderStatus,
            models::order::CreateOrderPayload,
            models::order::UpdateOrderStatusPayload,
            models::order::StatusTransition,

            models::employee::SalesEmployee,
            models::employee::CreateEmployeePayload,
            models::employee::SetEmployeeActivePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Dashboard", description = "KPIs, gráfico de 7 dias e ranking de vendedores"),
        (name = "Leads", description = "Captação de clientes potenciais"),
        (name = "Orders", description = "Pedidos de impressão e status"),
        (name = "Employees", description = "Cadastro de vendedores")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_the_dashboard_endpoints() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/dashboard/metrics",
            "/api/dashboard/employee-kpis",
            "/api/dashboard/chart-data",
            "/api/dashboard/employee-ranking",
        ] {
            assert!(doc.paths.paths.contains_key(path), "faltando {}", path);
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
