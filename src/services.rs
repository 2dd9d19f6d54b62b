pub mod auth;
pub mod dashboard_service;
pub mod employee_service;
pub mod lead_service;
pub mod order_service;
