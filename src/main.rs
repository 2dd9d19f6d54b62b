//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(&config).await?;

    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = router(app_state);

    let listener = TcpListener::bind(&config.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(app_state: AppState) -> Router {
    // Públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let dashboard_routes = Router::new()
        .route("/metrics", get(handlers::dashboard::get_metrics))
        .route("/employee-kpis", get(handlers::dashboard::get_employee_kpis))
        .route("/chart-data", get(handlers::dashboard::get_chart_data))
        .route("/employee-ranking", get(handlers::dashboard::get_employee_ranking));

    let lead_routes = Router::new()
        .route("/"
               ,post(handlers::leads::create_lead)
               .get(handlers::leads::list_leads)
        )
        .route("/{id}", get(handlers::leads::get_lead))
        .route("/{id}/assign", patch(handlers::leads::assign_lead))
        .route("/{id}/convert", patch(handlers::leads::convert_lead));

    let order_routes = Router::new()
        .route("/"
               ,post(handlers::orders::create_order)
               .get(handlers::orders::list_orders)
        )
        .route("/status-transitions", get(handlers::orders::get_status_transitions))
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/status", patch(handlers::orders::update_order_status));

    let employee_routes = Router::new()
        .route("/"
               ,post(handlers::employees::create_employee)
               .get(handlers::employees::list_employees)
        )
        .route("/{id}/active", patch(handlers::employees::set_employee_active));

    // Tudo abaixo exige JWT
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/leads", lead_routes)
        .nest("/orders", order_routes)
        .nest("/employees", employee_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
