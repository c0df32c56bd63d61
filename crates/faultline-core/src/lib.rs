#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Shared error vocabulary for faultline services
//!
//! [`Fault`] is the one taxonomy every failure ends in. Values are checked
//! either fail-fast through [`AssertionConcern`] or accumulate-all through
//! a [`ValidationHandler`] such as [`NotificationHandler`]. Faults cross
//! process boundaries as [`ErrorResponse`] payloads.

mod error;
mod fault;
mod response;
pub mod validation;

pub use error::HttpError;
pub use fault::{BoxError, DOMAIN_MESSAGE, Fault, FaultKind, VALIDATION_MESSAGE};
pub use response::ErrorResponse;
pub use validation::{AssertionConcern, Error, NotificationHandler, ValidationHandler, Validator};
