use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::borrow::Cow;
use std::fmt::Display;

/// Public error taxonomy. Every failure a client can observe maps to
/// exactly one of these variants; anything else collapses into
/// [`Error::Internal`] at the route boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or malformed input (400).
    Validation(Cow<'static, str>),
    /// A unique key already holds the submitted value (409).
    Conflict,
    /// No record matched the request (404).
    NotFound,
    /// Credentials did not match (401).
    Unauthorized,
    /// Any unanticipated failure (500).
    Internal,
}

impl Error {
    /// The message exposed to clients. Internal failures always render
    /// the same generic message regardless of runtime mode.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message) => message,
            Self::Conflict => "User with this email already exists.",
            Self::NotFound => "User not found.",
            Self::Unauthorized => "Invalid email or password.",
            Self::Internal => "Internal server error. Please try again later.",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(..) => f.write_str("User performed request with invalid body"),
            Self::Conflict => f.write_str("Request collided with an existing record"),
            Self::NotFound => f.write_str("Requested record does not exist"),
            Self::Unauthorized => f.write_str("Request presented invalid credentials"),
            Self::Internal => f.write_str("Failed to perform request"),
        }
    }
}

impl std::error::Error for Error {}

// Serialized straight into the uniform failure envelope so that
// `HttpResponse::json` on the error type emits the response body as is.
impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("Error", 2)?;
        body.serialize_field("success", &false)?;
        body.serialize_field("message", self.message())?;
        body.end()
    }
}
