use crate::fault::Fault;
use crate::validation::Error;

/// Accumulator for errors found across one validation attempt
///
/// A handler is a fault-absorbing boundary: nothing appended to it, and
/// nothing raised inside [`ValidationHandler::validate`], escapes as an
/// `Err`. Callers inspect it once the batch is done, typically through
/// [`ValidationHandler::check`].
///
/// One handler belongs to one attempt (one incoming request, one config
/// file); it is not meant to be shared.
pub trait ValidationHandler {
    fn append(&mut self, error: Error) -> &mut Self;

    /// Flatten another handler's errors into this one
    fn append_handler<H: ValidationHandler + ?Sized>(&mut self, other: &H) -> &mut Self {
        for error in other.errors() {
            self.append(error.clone());
        }
        self
    }

    /// Run a step that may fail, absorbing the failure as errors
    ///
    /// Returns the step's value on success and `None` otherwise.
    fn validate<T, E, F>(&mut self, step: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<anyhow::Error>;

    /// Accumulated errors in insertion order
    fn errors(&self) -> &[Error];

    fn has_error(&self) -> bool {
        !self.errors().is_empty()
    }

    fn first_error(&self) -> Option<&Error> {
        self.errors().first()
    }

    /// Single decision point after a batch: every collected error as one fault
    ///
    /// # Errors
    ///
    /// Returns [`Fault::Validation`] carrying all errors when any were collected
    fn check(&self) -> Result<(), Fault> {
        if self.has_error() {
            Err(Fault::validation(self.errors().to_vec()))
        } else {
            Ok(())
        }
    }
}
