#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Outbound HTTP calls classified into the faultline taxonomy
//!
//! [`FaultClassifier`] maps statuses, response bodies and transport
//! failures to [`faultline_core::Fault`]s. [`ServiceClient`] wraps a
//! `reqwest` client so every request goes through it.

mod call;
mod classifier;
mod client;
mod decoder;
mod error;
mod transport;

pub use call::Call;
pub use classifier::FaultClassifier;
pub use client::ServiceClient;
pub use decoder::decode_error_response;
pub use error::CallError;
pub use transport::TransportFailure;
