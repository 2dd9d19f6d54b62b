pub mod dashboard_repo;
pub use dashboard_repo::{DashboardRepository, DashboardSource};
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod order_repo;
pub use order_repo::{OrderRepository, OrderStore};
pub mod user_repo;
pub use user_repo::UserRepository;
