use serde::{Deserialize, Serialize};

use crate::validation::Error;

/// Wire payload of any fault crossing a process boundary
///
/// ```json
/// {"message": "ValidationException", "errors": [{"property": "name", "message": "required"}]}
/// ```
///
/// Both fields are required when deserializing; a body missing either one
/// is not a structured payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    message: String,
    errors: Vec<Error>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, errors: Vec<Error>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// First error's message, or the top-level message when there are no errors
    pub fn summary(&self) -> &str {
        self.errors.first().map_or(self.message.as_str(), Error::message)
    }

    pub fn into_parts(self) -> (String, Vec<Error>) {
        (self.message, self.errors)
    }
}
