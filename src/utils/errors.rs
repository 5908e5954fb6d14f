//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                eprintln!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                eprintln!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                eprintln!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                eprintln!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                eprintln!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                eprintln!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Función helper para crear un error de validación de un solo campo
pub fn validation_error(field: &'static str, error: validator::ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    AppError::Validation(errors)
}
