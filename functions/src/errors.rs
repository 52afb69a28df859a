use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller supplied missing or unusable input. Reported as plain text.
    #[error("{0}")]
    BadRequest(String),
    #[error("Embedding request failed: {0}")]
    Embedding(String),
    #[error("Search request failed: {0}")]
    Search(String),
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Embedding(_) | ServiceError::Search(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::BadRequest(msg) => HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(msg.clone()),
            ServiceError::Embedding(msg) => {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Embedding Error".to_string(),
                    message: msg.clone(),
                })
            }
            ServiceError::Search(msg) => HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Search Error".to_string(),
                message: msg.clone(),
            }),
        }
    }
}
