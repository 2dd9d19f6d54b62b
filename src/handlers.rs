pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod leads;
pub mod orders;
