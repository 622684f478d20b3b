use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Request body rejected before any service runs.
#[derive(Debug)]
pub struct InvalidRequest(String);

impl InvalidRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    name: &'static str,
    message: String,
}

#[derive(Debug)]
pub struct ErrorStatus(StatusCode, ErrorBody);

impl ErrorStatus {
    pub fn status(&self) -> StatusCode {
        self.0
    }

    pub fn body(&self) -> &ErrorBody {
        &self.1
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        let error = *e.current_context();
        let status = match error {
            KernelError::NotFound(_) => StatusCode::NOT_FOUND,
            KernelError::PendentRental | KernelError::MovieInRental => StatusCode::CONFLICT,
            KernelError::InsufficientAge => StatusCode::FORBIDDEN,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match error {
            KernelError::Timeout | KernelError::Internal => tracing::error!("{:?}", e),
            _ => tracing::debug!("Rejected request: {}", error),
        }
        ErrorStatus(
            status,
            ErrorBody {
                name: error.name(),
                message: error.to_string(),
            },
        )
    }
}

impl From<InvalidRequest> for ErrorStatus {
    fn from(e: InvalidRequest) -> Self {
        tracing::debug!("Invalid request: {}", e.0);
        ErrorStatus(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody {
                name: "InvalidRequestError",
                message: e.0,
            },
        )
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        (self.0, Json(self.1)).into_response()
    }
}
