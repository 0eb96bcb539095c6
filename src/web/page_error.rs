//! HTML rendering of application errors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}

/// Error returned by page handlers: 404s render the not-found page, every
/// other error the generic error page with the matching status.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();

        if self.0.is_not_found() {
            let page = NotFoundTemplate {
                message: self.0.to_string(),
            };
            return (status, page).into_response();
        }

        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, details = %self.0.details(), "Page failed");
            "Something went wrong on our side. Please try again later.".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            ErrorTemplate {
                status: status.as_u16(),
                message,
            },
        )
            .into_response()
    }
}

/// Fallback for unknown paths.
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            message: "Page not found".to_string(),
        },
    )
}
