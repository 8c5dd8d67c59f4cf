//! API error type: every handler failure maps to a status code and a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crcrisk_scorer::ScoreError;

use crate::form::FormError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Form(e) => e.kind(),
            ApiError::Score(e) => e.kind(),
            ApiError::Render(_) => "render",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Form(_) | ApiError::Score(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Input problems the user can fix, as opposed to server faults.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Form(_) | ApiError::Score(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.is_validation() {
            tracing::error!("Request failed: {self}");
        }
        let body = json!({ "error": self.to_string(), "kind": self.kind() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_unprocessable() {
        let err = ApiError::from(ScoreError::MissingGeneValue { gene: "ORAI3".into() });
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "missing_gene_value");
        assert_eq!(err.to_string(), "No expression value supplied for gene ORAI3");
    }

    #[test]
    fn test_render_error_is_server_fault() {
        let err = ApiError::from(minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "missing.html",
        ));
        assert!(!err.is_validation());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
