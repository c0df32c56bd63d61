use crate::validation::{Error, ValidationHandler};

/// One cohesive validation step reporting into a caller-supplied handler
///
/// Implementors hold a mutable borrow of the handler for the duration of
/// the step and append to it instead of returning early, so several
/// validators can run over the same request before one final
/// [`ValidationHandler::check`].
pub trait Validator {
    type Handler: ValidationHandler;

    fn handler(&mut self) -> &mut Self::Handler;

    /// Run the step; violations go to [`Validator::handler`]
    fn validate(&mut self);

    fn report(&mut self, error: Error) {
        self.handler().append(error);
    }
}
