use http::StatusCode;

use crate::fault::Fault;

/// Trait for faults that can be rendered as HTTP responses
///
/// The serving layer turns these into actual responses, keeping the
/// taxonomy decoupled from any web framework.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `validation`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

impl HttpError for Fault {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Domain { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { status_code, .. } => status_code
                .and_then(|code| StatusCode::from_u16(code).ok())
                .filter(|code| code.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn error_type(&self) -> &str {
        self.kind().into()
    }

    fn client_message(&self) -> String {
        // the cause chain stays server-side
        self.message().to_owned()
    }
}
