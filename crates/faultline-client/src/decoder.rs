use faultline_core::ErrorResponse;

/// Best-effort parse of a remote error body
///
/// Returns `None` when the body is not JSON, is JSON of another shape, or
/// lacks `message` or `errors`. That is an expected outcome, not a fault:
/// the caller falls back to a synthetic payload built from the raw text.
pub fn decode_error_response(body: &str) -> Option<ErrorResponse> {
    serde_json::from_str(body).ok()
}
