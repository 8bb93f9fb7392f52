use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

use crate::models::DatasetKind;
use crate::validation::Violation;

/// Request parameters that failed validation, keyed by field name
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
#[error("Invalid request parameters: {fields:?}")]
pub struct ParameterError {
    fields: BTreeMap<String, Vec<String>>,
}

impl ParameterError {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for one field
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }
}

/// Every violation found while validating one dataset
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{dataset} dataset failed validation with {} violation(s)", .violations.len())]
pub struct DatasetValidationError {
    pub dataset: DatasetKind,
    pub violations: Vec<Violation>,
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidParameters(#[from] ParameterError),

    #[error(transparent)]
    InvalidDataset(#[from] DatasetValidationError),

    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: u64 },

    #[error("No content matches keyword: {keyword}")]
    NoMatch { keyword: String },

    #[error("Data source error: {0}")]
    DataSource(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidParameters(errors) => (StatusCode::BAD_REQUEST, json!(errors)),
            AppError::InvalidDataset(error) => {
                let violations: Vec<String> =
                    error.violations.iter().map(ToString::to_string).collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": format!(
                            "Invalid data received from DB: {}: {}",
                            error,
                            violations.join("; ")
                        ),
                        "dataset": error.dataset,
                        "violations": error.violations,
                    }),
                )
            }
            AppError::StudentNotFound { .. } | AppError::NoMatch { .. } => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::DataSource(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
