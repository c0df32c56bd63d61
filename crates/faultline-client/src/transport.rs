use std::error::Error as StdError;
use std::io;

/// What went wrong with a call that never produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
pub enum TransportFailure {
    /// The peer could not be reached
    #[strum(serialize = "ConnectionTimeout error observed")]
    Connect,
    /// The peer accepted the connection but did not answer in time
    #[strum(serialize = "Timeout error observed")]
    Timeout,
    #[strum(serialize = "Error observed")]
    Other,
}

impl TransportFailure {
    /// Inspect an error and its whole source chain for a root cause
    pub fn of(error: &(dyn StdError + 'static)) -> Self {
        std::iter::successors(Some(error), |&current| current.source())
            .find_map(Self::classify_one)
            .unwrap_or(Self::Other)
    }

    fn classify_one(error: &(dyn StdError + 'static)) -> Option<Self> {
        if let Some(e) = error.downcast_ref::<reqwest::Error>() {
            if e.is_connect() {
                return Some(Self::Connect);
            }
            if e.is_timeout() {
                return Some(Self::Timeout);
            }
            return None;
        }

        let e = error.downcast_ref::<io::Error>()?;
        match e.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable => Some(Self::Connect),
            io::ErrorKind::TimedOut => Some(Self::Timeout),
            _ => None,
        }
    }
}
