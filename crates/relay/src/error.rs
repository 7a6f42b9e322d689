use blxr_constants::relay::{CLIENT_ERROR_CODE, NO_RESPONSE_MESSAGE};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A relay or transport failure.
///
/// Relay JSON-RPC error objects deserialize into this type directly.
/// Failures that never produced a usable reply are normalized into the same
/// shape with code `-1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("relay error {code}: {message}")]
pub struct RelayError {
    /// Error code. Relay-defined, HTTP status, or `-1` for client-side failures.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
}

impl RelayError {
    /// Create a new error.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// The request was sent but no usable reply came back.
    pub fn no_response() -> Self {
        Self::new(CLIENT_ERROR_CODE, NO_RESPONSE_MESSAGE)
    }

    /// The request could not be made at all.
    pub fn client(err: impl Display) -> Self {
        Self::new(CLIENT_ERROR_CODE, err.to_string())
    }

    /// The reply could not be understood.
    pub fn invalid_response(err: impl Display) -> Self {
        Self::new(CLIENT_ERROR_CODE, format!("rpc error: invalid response: {err}"))
    }

    /// True if the error was produced locally rather than by the relay.
    pub const fn is_client_error(&self) -> bool {
        self.code == CLIENT_ERROR_CODE
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::client(err)
        } else {
            Self::no_response()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_response_shape() {
        let err = RelayError::no_response();
        let json = serde_json::to_value(&err).unwrap();
        let expected = serde_json::json!({
            "code": -1,
            "message": "rpc error: no response received from server",
        });
        assert_eq!(json, expected);
        assert!(err.is_client_error());
    }

    #[test]
    fn relay_error_object_deserializes() {
        let err: RelayError =
            serde_json::from_str(r#"{"code":-32602,"message":"invalid params","data":null}"#)
                .unwrap();
        assert_eq!(err, RelayError::new(-32602, "invalid params"));
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "relay error -32602: invalid params");
    }
}
