use crate::fault::Fault;
use crate::validation::{Error, ValidationHandler};

/// Default accumulating [`ValidationHandler`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationHandler {
    errors: Vec<Error>,
}

impl NotificationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler pre-seeded with one error
    pub fn with_error(error: Error) -> Self {
        Self { errors: vec![error] }
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl ValidationHandler for NotificationHandler {
    fn append(&mut self, error: Error) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Structured faults (domain, not-found, validation) contribute their
    /// whole error list; any other failure becomes one unbound [`Error`]
    /// holding its message.
    fn validate<T, E, F>(&mut self, step: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<anyhow::Error>,
    {
        let failure: anyhow::Error = match step() {
            Ok(value) => return Some(value),
            Err(failure) => failure.into(),
        };

        match failure.downcast::<Fault>() {
            Ok(fault) if fault.is_structured() => self.errors.extend(fault.into_errors()),
            Ok(fault) => self.errors.push(Error::from_message(fault.to_string())),
            Err(other) => self.errors.push(Error::from_message(other.to_string())),
        }

        None
    }

    fn errors(&self) -> &[Error] {
        &self.errors
    }
}
