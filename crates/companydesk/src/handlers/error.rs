use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use companydesk_core::api::ErrorBody;

/// Handler error rendered as an `{error}` envelope.
///
/// Every failure is a 500 carrying the route's fixed message, except a
/// missing record on direct lookup. The underlying cause is logged, never
/// sent to the client.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// A 404 with the given message.
    pub fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message,
            source: None,
        }
    }

    /// A 500 with the given message, caused by `source`.
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            source: Some(source.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self.source {
            Some(source) => {
                tracing::error!(error = %source, status = %self.status, reason = self.message, "Request failed")
            }
            None => tracing::warn!(status = %self.status, reason = self.message, "Request failed"),
        }

        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

/// Converts any error into an [`AppError::internal`] with a route message.
pub trait OrInternal<T> {
    fn or_internal(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E> OrInternal<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn or_internal(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|err| AppError::internal(message, err))
    }
}
