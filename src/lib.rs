//! Random course recommendation service.
//!
//! A single endpoint validates its query parameters and two tabular
//! datasets (student profiles and course content), then draws one course
//! matching the student's interest keyword.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod validation;
