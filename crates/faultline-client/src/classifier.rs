use faultline_core::{BoxError, Error, ErrorResponse, Fault, FaultKind};
use reqwest::StatusCode;

use crate::call::{Call, Diagnostic};
use crate::decoder::decode_error_response;
use crate::error::CallError;
use crate::transport::TransportFailure;

const NOT_FOUND: &str = "Not found observed";
const BAD_REQUEST: &str = "Bad request observed";
const UNPROCESSABLE: &str = "Unprocessable entity observed";
const UNAUTHORIZED: &str = "Unauthorized observed";
const FORBIDDEN: &str = "Forbidden observed";
const CONFLICT: &str = "Conflict observed";
const UNEXPECTED_STATUS: &str = "Error observed";
const UNHANDLED: &str = "Unhandled error observed";

/// Status ranges the classifier treats differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Success,
    NotFound,
    BadRequest,
    Unprocessable,
    Unauthorized,
    Forbidden,
    Conflict,
    /// 5xx and any other non-success status without its own handling
    Unexpected,
}

impl StatusClass {
    const fn of(status: StatusCode) -> Self {
        match status.as_u16() {
            0..400 => Self::Success,
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            422 => Self::Unprocessable,
            _ => Self::Unexpected,
        }
    }
}

/// Maps the outcome of an outbound call to a [`Fault`]
///
/// One classifier per remote collaborator; `namespace` names that
/// collaborator in every message and log line. The classifier holds no
/// per-call state and is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct FaultClassifier {
    namespace: String,
}

impl FaultClassifier {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Classify a received response; `None` for 1xx-3xx
    ///
    /// An empty body is treated the same as an absent one.
    pub fn classify_response(&self, status: StatusCode, body: Option<&str>, call: &Call<'_>) -> Option<Fault> {
        if StatusClass::of(status) == StatusClass::Success {
            return None;
        }

        let body = body.filter(|body| !body.is_empty());
        Some(self.classify_failure(status, body, call))
    }

    fn classify_failure(&self, status: StatusCode, body: Option<&str>, call: &Call<'_>) -> Fault {
        let (fault, diagnostic) = match StatusClass::of(status) {
            StatusClass::NotFound => {
                let message = Diagnostic::new(NOT_FOUND, &self.namespace, call).to_string();
                (Fault::not_found_message(message.clone()), message)
            }
            StatusClass::BadRequest => {
                let (payload, diagnostic) = self.client_error(BAD_REQUEST, body, call);
                (Fault::validation(payload.into_parts().1), diagnostic)
            }
            StatusClass::Unprocessable => {
                let (payload, diagnostic) = self.client_error(UNPROCESSABLE, body, call);
                (Fault::domain_errors(payload.into_parts().1), diagnostic)
            }
            StatusClass::Unauthorized => {
                let (payload, diagnostic) = self.client_error(UNAUTHORIZED, body, call);
                (Fault::unauthorized(payload.summary()), diagnostic)
            }
            StatusClass::Forbidden => {
                let (payload, diagnostic) = self.client_error(FORBIDDEN, body, call);
                (Fault::forbidden(payload.summary()), diagnostic)
            }
            StatusClass::Conflict => {
                let (payload, diagnostic) = self.client_error(CONFLICT, body, call);
                (Fault::conflict(payload.summary()), diagnostic)
            }
            StatusClass::Success | StatusClass::Unexpected => {
                let message = Diagnostic::new(UNEXPECTED_STATUS, &self.namespace, call)
                    .with_status(status.as_u16())
                    .with_response(body)
                    .to_string();
                (Fault::internal_with_status(message.clone(), status.as_u16()), message)
            }
        };

        self.observe(&fault, &diagnostic, call);
        fault
    }

    /// Payload of a 4xx response, plus the line to log for it
    ///
    /// Absent body: the diagnostic itself with no errors. Undecodable body:
    /// one unbound error holding the raw text.
    fn client_error(&self, condition: &str, body: Option<&str>, call: &Call<'_>) -> (ErrorResponse, String) {
        let diagnostic = Diagnostic::new(condition, &self.namespace, call);

        let Some(raw) = body else {
            let message = diagnostic.to_string();
            return (ErrorResponse::new(message.clone(), Vec::new()), message);
        };

        let payload = decode_error_response(raw).unwrap_or_else(|| {
            ErrorResponse::new(
                format!("{condition} from {}", self.namespace),
                vec![Error::from_message(raw)],
            )
        });

        (payload, diagnostic.with_response(Some(raw)).to_string())
    }

    /// Turn any call failure into a fault
    ///
    /// Faults pass through untouched, so classifying twice is harmless.
    pub fn resolve(&self, error: CallError, call: &Call<'_>) -> Fault {
        match error {
            CallError::Fault(fault) => fault,
            CallError::Http(error) => self.resolve_http(error, call),
            CallError::Other(error) => match error.downcast::<Fault>() {
                Ok(fault) => fault,
                Err(error) => match error.downcast::<reqwest::Error>() {
                    Ok(error) => self.resolve_http(error, call),
                    Err(error) => match TransportFailure::of(&*error) {
                        TransportFailure::Other => self.unhandled(error, call),
                        failure => self.transport(failure, error, call),
                    },
                },
            },
        }
    }

    fn resolve_http(&self, error: reqwest::Error, call: &Call<'_>) -> Fault {
        // raised by `error_for_status`, the body is already gone
        if let Some(fault) = error
            .status()
            .and_then(|status| self.classify_response(status, None, call))
        {
            return fault;
        }

        if error.is_decode() || error.is_builder() {
            return self.unhandled(error, call);
        }

        let failure = TransportFailure::of(&error);
        self.transport(failure, error, call)
    }

    fn transport(&self, failure: TransportFailure, cause: impl Into<BoxError>, call: &Call<'_>) -> Fault {
        let condition: &'static str = failure.into();
        let message = Diagnostic::new(condition, &self.namespace, call).to_string();
        let fault = Fault::internal_with_cause(message.clone(), cause);
        self.observe(&fault, &message, call);
        fault
    }

    fn unhandled(&self, cause: impl Into<BoxError>, call: &Call<'_>) -> Fault {
        let message = Diagnostic::new(UNHANDLED, &self.namespace, call).to_string();
        let fault = Fault::internal_with_cause(message.clone(), cause);
        self.observe(&fault, &message, call);
        fault
    }

    /// One log line per classified outcome; internal faults at warn
    fn observe(&self, fault: &Fault, diagnostic: &str, call: &Call<'_>) {
        let kind = fault.kind();
        let status = fault.recorded_status();

        if kind == FaultKind::Internal {
            tracing::warn!(
                namespace = %self.namespace,
                method = %call.method(),
                resource_id = call.resource_id(),
                %kind,
                status,
                "{diagnostic}"
            );
        } else {
            tracing::info!(
                namespace = %self.namespace,
                method = %call.method(),
                resource_id = call.resource_id(),
                %kind,
                "{diagnostic}"
            );
        }
    }

    /// Pass a 1xx-3xx response through, or read the body and classify it
    ///
    /// # Errors
    ///
    /// Returns the classified [`Fault`] for any other status
    pub async fn check(&self, response: reqwest::Response, call: &Call<'_>) -> Result<reqwest::Response, Fault> {
        let status = response.status();
        if StatusClass::of(status) == StatusClass::Success {
            return Ok(response);
        }

        let body = response.text().await.ok();
        let body = body.as_deref().filter(|body| !body.is_empty());

        Err(self.classify_failure(status, body, call))
    }

    /// Read policy: a missing resource is an empty result, not a fault
    ///
    /// # Errors
    ///
    /// Returns every other classified fault
    pub fn do_get<T>(&self, call: &Call<'_>, outcome: Result<T, CallError>) -> Result<Option<T>, Fault> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(error) => match self.resolve(error, call) {
                fault if fault.kind() == FaultKind::NotFound => Ok(None),
                fault => Err(fault),
            },
        }
    }

    /// Create policy: taxonomy faults propagate unchanged, the rest become internal
    ///
    /// # Errors
    ///
    /// Returns the classified [`Fault`]
    pub fn do_post<T>(&self, call: &Call<'_>, outcome: Result<T, CallError>) -> Result<T, Fault> {
        outcome.map_err(|error| self.resolve(error, call))
    }

    /// Update policy (PUT, PATCH, DELETE); a missing resource is a fault here
    ///
    /// # Errors
    ///
    /// Returns the classified [`Fault`]
    pub fn do_update<T>(&self, call: &Call<'_>, outcome: Result<T, CallError>) -> Result<T, Fault> {
        outcome.map_err(|error| self.resolve(error, call))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;

    fn classifier() -> FaultClassifier {
        FaultClassifier::new("users-ms")
    }

    fn classify(status: u16, body: Option<&str>, call: &Call<'_>) -> Fault {
        let status = StatusCode::from_u16(status).unwrap();
        classifier().classify_response(status, body, call).unwrap()
    }

    #[test]
    fn success_statuses_are_not_faults() {
        for status in [200, 201, 204, 302] {
            let status = StatusCode::from_u16(status).unwrap();
            assert!(classifier().classify_response(status, None, &Call::get("1")).is_none());
        }
    }

    #[test]
    fn not_found_names_namespace_and_id() {
        let fault = classify(404, Some("gone"), &Call::put("42"));

        assert_eq!(fault.kind(), FaultKind::NotFound);
        assert_eq!(fault.message(), "Not found observed from users-ms [method:PUT] [resourceId:42]");
    }

    #[test]
    fn bad_request_decodes_errors() {
        let body = r#"{"message":"x","errors":[{"property":"firstName","message":"should not be empty"}]}"#;

        let fault = classify(400, Some(body), &Call::post(Some("42")));

        assert_eq!(fault.kind(), FaultKind::Validation);
        assert_eq!(fault.errors(), &[Error::new("firstName", "should not be empty")]);
    }

    #[test]
    fn bad_request_with_raw_body_keeps_it_as_one_error() {
        let fault = classify(400, Some("name is required"), &Call::post(Some("42")));

        assert_eq!(fault.errors(), &[Error::from_message("name is required")]);
    }

    #[test]
    fn bad_request_without_body_has_no_errors() {
        let fault = classify(400, Some(""), &Call::post(Some("42")));

        assert_eq!(fault.kind(), FaultKind::Validation);
        assert!(fault.errors().is_empty());
    }

    #[test]
    fn unprocessable_entity_is_domain_fault() {
        let body = r#"{"message":"x","errors":[{"property":"stock","message":"insufficient"}]}"#;

        let fault = classify(422, Some(body), &Call::patch("9"));

        assert_eq!(fault.kind(), FaultKind::Domain);
        assert_eq!(fault.errors(), &[Error::new("stock", "insufficient")]);
    }

    #[test]
    fn access_faults_prefer_first_error_message() {
        let body = r#"{"message":"denied","errors":[{"property":"","message":"token expired"}]}"#;
        let fault = classify(401, Some(body), &Call::get("1"));
        assert_eq!(fault.kind(), FaultKind::Unauthorized);
        assert_eq!(fault.message(), "token expired");

        let body = r#"{"message":"not yours","errors":[]}"#;
        let fault = classify(403, Some(body), &Call::get("1"));
        assert_eq!(fault.kind(), FaultKind::Forbidden);
        assert_eq!(fault.message(), "not yours");

        let fault = classify(409, Some("email taken"), &Call::put("1"));
        assert_eq!(fault.kind(), FaultKind::Conflict);
        assert_eq!(fault.message(), "email taken");
    }

    #[test]
    fn access_fault_without_body_uses_diagnostic() {
        let fault = classify(409, None, &Call::put("1").with_action("rename"));

        assert_eq!(
            fault.message(),
            "Conflict observed during rename from users-ms [method:PUT] [resourceId:1]"
        );
    }

    #[test]
    fn server_error_carries_status_and_body() {
        let fault = classify(500, Some("boom"), &Call::get("42"));

        assert_eq!(fault.kind(), FaultKind::Internal);
        assert_eq!(fault.recorded_status(), Some(500));
        assert_eq!(
            fault.message(),
            "Error observed from users-ms [method:GET] [resourceId:42] [status:500] [response:boom]"
        );
    }

    #[test]
    fn server_error_without_body_still_carries_status() {
        let fault = classify(503, None, &Call::get("42"));

        assert_eq!(fault.recorded_status(), Some(503));
        assert!(!fault.message().contains("[response:"));
    }

    #[test]
    fn unlisted_status_is_internal() {
        let fault = classify(429, Some("slow down"), &Call::post(None));

        assert_eq!(fault.kind(), FaultKind::Internal);
        assert_eq!(fault.recorded_status(), Some(429));
        assert!(fault.message().starts_with("Error observed from users-ms on making a POST request"));
    }

    #[test]
    fn resolve_passes_faults_through() {
        let call = Call::get("1");
        let fault = classifier().resolve(Fault::internal_with_status("upstream", 502).into(), &call);

        assert_eq!(fault.message(), "upstream");
        assert_eq!(fault.recorded_status(), Some(502));

        let wrapped = anyhow::Error::new(Fault::domain("rule broken"));
        let fault = classifier().resolve(wrapped.into(), &call);
        assert_eq!(fault.kind(), FaultKind::Domain);
        assert_eq!(fault.message(), "rule broken");
    }

    #[test]
    fn resolve_wraps_unexpected_failure_as_unhandled() {
        let call = Call::put("7");

        let fault = classifier().resolve(anyhow::anyhow!("mapping failed").into(), &call);

        assert_eq!(fault.kind(), FaultKind::Internal);
        assert_eq!(
            fault.message(),
            "Unhandled error observed from users-ms [method:PUT] [resourceId:7]"
        );
        assert_eq!(fault.source().map(ToString::to_string).as_deref(), Some("mapping failed"));
    }

    #[test]
    fn resolve_recognizes_transport_cause_in_other_failures() {
        let call = Call::post(None);
        let refused = anyhow::Error::new(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));

        let fault = classifier().resolve(refused.into(), &call);

        assert_eq!(
            fault.message(),
            "ConnectionTimeout error observed from users-ms on making a POST request"
        );
        assert!(fault.source().is_some());
    }

    #[test]
    fn do_get_absorbs_not_found() {
        let call = Call::get("1");
        let not_found = classify(404, None, &call);

        let outcome: Result<Option<u8>, Fault> = classifier().do_get(&call, Err(not_found.into()));
        assert!(matches!(outcome, Ok(None)));

        assert_eq!(classifier().do_get(&call, Ok::<_, CallError>(5)).unwrap(), Some(5));
    }

    #[test]
    fn do_get_raises_everything_else() {
        let call = Call::get("1");

        let outcome: Result<Option<u8>, Fault> = classifier().do_get(&call, Err(Fault::forbidden("no").into()));

        assert_eq!(outcome.unwrap_err().kind(), FaultKind::Forbidden);
    }

    #[test]
    fn do_update_raises_not_found() {
        let call = Call::delete("1");
        let not_found = classify(404, None, &call);

        let outcome: Result<(), Fault> = classifier().do_update(&call, Err(not_found.into()));

        assert_eq!(outcome.unwrap_err().kind(), FaultKind::NotFound);
    }

    #[test]
    fn do_post_keeps_validation_errors() {
        let call = Call::post(None);
        let invalid = Fault::validation_error(Error::new("email", "invalid"));

        let outcome: Result<(), Fault> = classifier().do_post(&call, Err(invalid.into()));

        assert_eq!(outcome.unwrap_err().errors(), &[Error::new("email", "invalid")]);
    }
}
