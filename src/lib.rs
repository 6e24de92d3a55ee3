//! Pharmacy management REST backend: axum routes over a MySQL schema of
//! patients, doctors, pharmacies, drugs, employees, bills, and prescriptions.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{AppConfig, DbConfig};
pub use error::AppError;
pub use routes::app;
pub use state::AppState;
