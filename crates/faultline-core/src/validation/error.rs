use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A single violation: the offending property and a human-readable message
///
/// The property may be empty when the violation is not tied to a field
/// (for example an error recovered from an unstructured failure).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Error {
    #[serde(default, deserialize_with = "null_as_empty")]
    property: String,
    message: String,
}

/// Peers may send `"property": null` for unbound errors
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Error {
    /// Create an error for a named property
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Create an error that is not bound to any property
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.property, self.message)
        }
    }
}
