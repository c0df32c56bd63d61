use strum::{AsRefStr, Display, IntoStaticStr};

use crate::response::ErrorResponse;
use crate::validation::Error;

/// Message carried by every validation fault; peers route on it
pub const VALIDATION_MESSAGE: &str = "ValidationException";

/// Message of a domain fault built from errors alone
pub const DOMAIN_MESSAGE: &str = "DomainException";

/// Boxed lower-level cause kept by internal faults
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Discriminant of a [`Fault`], used in logs and for routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FaultKind {
    Domain,
    NotFound,
    Validation,
    Internal,
    Forbidden,
    Unauthorized,
    Conflict,
}

/// Every failure the core knows how to represent
///
/// Faults are expected control-flow signals, not bug reports, so none of
/// the variants capture a backtrace. Only [`Fault::Internal`] keeps a
/// lower-level cause; business faults carry field-level [`Error`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// Business-rule violation, the umbrella kind
    #[error("{message}")]
    Domain { message: String, errors: Vec<Error> },

    /// A referenced resource does not exist
    #[error("{message}")]
    NotFound { message: String, errors: Vec<Error> },

    /// One or more field-level violations
    #[error("ValidationException")]
    Validation { errors: Vec<Error> },

    /// Infrastructure failure: timeouts, unexpected responses, bugs below us
    #[error("{message}")]
    Internal {
        message: String,
        status_code: Option<u16>,
        #[source]
        cause: Option<BoxError>,
    },

    /// The remote side refused the caller (HTTP 403)
    #[error("{message}")]
    Forbidden { message: String },

    /// The caller is not authenticated (HTTP 401)
    #[error("{message}")]
    Unauthorized { message: String },

    /// The request conflicts with current state (HTTP 409)
    #[error("{message}")]
    Conflict { message: String },
}

impl Fault {
    /// Domain fault with a message and no errors
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Domain fault carrying errors under the default message
    pub fn domain_errors(errors: Vec<Error>) -> Self {
        Self::domain_with(DOMAIN_MESSAGE, errors)
    }

    /// Domain fault with one error under the default message
    pub fn domain_error(error: Error) -> Self {
        Self::domain_errors(vec![error])
    }

    /// Domain fault with both a message and errors
    pub fn domain_with(message: impl Into<String>, errors: Vec<Error>) -> Self {
        Self::Domain {
            message: message.into(),
            errors,
        }
    }

    /// Not-found fault `"<resource> with id <id> was not found"`
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::not_found_by(resource, "id", id)
    }

    /// `"<resource> with <field> <value> was not found"`
    pub fn not_found_by(resource: &str, field: &str, value: impl std::fmt::Display) -> Self {
        Self::not_found_message(format!("{resource} with {field} {value} was not found"))
    }

    /// Not-found fault with a message built elsewhere
    pub fn not_found_message(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Validation fault carrying every collected error
    pub const fn validation(errors: Vec<Error>) -> Self {
        Self::Validation { errors }
    }

    /// Validation fault for a single violation
    pub fn validation_error(error: Error) -> Self {
        Self::Validation { errors: vec![error] }
    }

    /// Internal fault with neither status nor cause
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            status_code: None,
            cause: None,
        }
    }

    /// Internal fault recording the status a collaborator answered with
    pub fn internal_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Internal {
            message: message.into(),
            status_code: Some(status_code),
            cause: None,
        }
    }

    /// Internal fault wrapping a lower-level error
    pub fn internal_with_cause(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self::Internal {
            message: message.into(),
            status_code: None,
            cause: Some(cause.into()),
        }
    }

    /// Internal fault with both a recorded status and a cause
    pub fn internal_with_status_and_cause(
        message: impl Into<String>,
        status_code: u16,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            status_code: Some(status_code),
            cause: Some(cause.into()),
        }
    }

    /// Access fault for HTTP 403
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Access fault for HTTP 401
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Access fault for HTTP 409
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Which taxonomy member this is
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::Domain { .. } => FaultKind::Domain,
            Self::NotFound { .. } => FaultKind::NotFound,
            Self::Validation { .. } => FaultKind::Validation,
            Self::Internal { .. } => FaultKind::Internal,
            Self::Forbidden { .. } => FaultKind::Forbidden,
            Self::Unauthorized { .. } => FaultKind::Unauthorized,
            Self::Conflict { .. } => FaultKind::Conflict,
        }
    }

    /// Human-readable message; `ValidationException` for validation faults
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { .. } => VALIDATION_MESSAGE,
            Self::Domain { message, .. }
            | Self::NotFound { message, .. }
            | Self::Internal { message, .. }
            | Self::Forbidden { message }
            | Self::Unauthorized { message }
            | Self::Conflict { message } => message,
        }
    }

    /// Field-level errors; empty for kinds that only carry a message
    pub fn errors(&self) -> &[Error] {
        match self {
            Self::Domain { errors, .. } | Self::NotFound { errors, .. } | Self::Validation { errors } => errors,
            _ => &[],
        }
    }

    /// Take the field-level errors, empty for message-only kinds
    pub fn into_errors(self) -> Vec<Error> {
        match self {
            Self::Domain { errors, .. } | Self::NotFound { errors, .. } | Self::Validation { errors } => errors,
            _ => Vec::new(),
        }
    }

    /// Oldest field-level error, if any
    pub fn first_error(&self) -> Option<&Error> {
        self.errors().first()
    }

    /// Whether this kind carries an error list (domain, not-found, validation)
    pub const fn is_structured(&self) -> bool {
        matches!(
            self,
            Self::Domain { .. } | Self::NotFound { .. } | Self::Validation { .. }
        )
    }

    /// Status recorded on an internal fault, if any
    pub const fn recorded_status(&self) -> Option<u16> {
        match self {
            Self::Internal { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Canonical wire payload for this fault
    ///
    /// Internal causes are never rendered.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.message(), self.errors().to_vec())
    }
}
