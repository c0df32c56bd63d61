use faultline_core::Fault;

/// Failure of one outbound call before classification
///
/// Handed to [`FaultClassifier`](crate::FaultClassifier), which turns every
/// variant into a [`Fault`].
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// Already classified, e.g. by a status check
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Anything else raised while handling the call
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
