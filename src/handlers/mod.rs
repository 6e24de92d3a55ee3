//! HTTP handlers, one module per resource.

pub mod bills;
pub mod dashboard;
pub mod doctors;
pub mod drugs;
pub mod employees;
pub mod patients;
pub mod pharmacies;
pub mod prescriptions;
pub mod reports;
