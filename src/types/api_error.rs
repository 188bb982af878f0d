//! Structured error body returned by the vSphere REST API.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the human-readable text inside a message object.
pub const DEFAULT_MESSAGE_KEY: &str = "default_message";

/// Key of the message identifier inside a message object.
pub const MESSAGE_ID_KEY: &str = "id";

/// Error returned by the server for any unexpected status code.
///
/// ```json
/// {
///   "error_type": "UNAUTHENTICATED",
///   "messages": [
///     { "args": [], "default_message": "Authentication required.", "id": "..." }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category tag, e.g. `UNAUTHENTICATED` or `INVALID_ARGUMENT`.
    pub error_type: String,

    /// Localizable messages, in server order.
    pub messages: Vec<Map<String, Value>>,

    /// Optional error-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiError {
    /// Text of the first message, if present.
    pub fn default_message(&self) -> Option<&str> {
        self.first_message_field(DEFAULT_MESSAGE_KEY)
    }

    /// Identifier of the first message, if present.
    pub fn message_id(&self) -> Option<&str> {
        self.first_message_field(MESSAGE_ID_KEY)
    }

    /// Texts of all messages that carry one.
    pub fn default_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| m.get(DEFAULT_MESSAGE_KEY).and_then(Value::as_str))
            .collect()
    }

    fn first_message_field(&self, key: &str) -> Option<&str> {
        self.messages.first()?.get(key)?.as_str()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type)?;
        if let Some(message) = self.default_message() {
            write!(f, ": {}", message)?;
        }
        if let Some(id) = self.message_id() {
            write!(f, " ({})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
