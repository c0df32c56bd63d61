//! Fail-fast assertions and accumulate-all validation

mod assertion;
mod error;
mod handler;
mod notification;
mod validator;

pub use assertion::AssertionConcern;
pub use error::Error;
pub use handler::ValidationHandler;
pub use notification::NotificationHandler;
pub use validator::Validator;
