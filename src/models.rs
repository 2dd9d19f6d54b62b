pub mod auth;
pub mod dashboard;
pub mod employee;
pub mod lead;
pub mod order;
