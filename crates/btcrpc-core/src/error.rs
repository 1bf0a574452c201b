use std::fmt;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A request value could not be serialized to JSON.
    #[error("could not encode to JSON: {0}")]
    Encoding(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Node(#[from] NodeError),

    /// No response body was obtained: connection refused, timeout, TLS or DNS failure.
    #[error("RPC transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0} with empty response body")]
    HttpStatus(StatusCode),

    #[error("invalid RPC configuration: {0}")]
    Configuration(String),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),

    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
}

// ==============================================================================
// Node Error
// ==============================================================================

/// The `error` member of a JSON-RPC response, kept exactly as the node sent it.
///
/// Bitcoin Core always answers with `{"code": <int>, "message": <string>}`,
/// but other JSON-RPC servers are free to put anything there, so the payload
/// is not reshaped. [`code`](Self::code) and [`message`](Self::message) read
/// the standard members when they exist.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeError {
    payload: serde_json::Value,
}

impl NodeError {
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    pub fn into_payload(self) -> serde_json::Value {
        self.payload
    }

    pub fn code(&self) -> Option<i64> {
        self.payload.get("code").and_then(serde_json::Value::as_i64)
    }

    pub fn message(&self) -> Option<&str> {
        self.payload
            .get("message")
            .and_then(serde_json::Value::as_str)
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "node error {code}: {message}"),
            _ => write!(f, "node error: {}", self.payload),
        }
    }
}

impl std::error::Error for NodeError {}

// ==============================================================================
// Parse Error
// ==============================================================================

/// A response body that is not valid JSON.
///
/// Keeps the original document alongside the parser position so callers can
/// point at the exact offending character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) document: String,
    pub(crate) reason: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) offset: usize,
}

impl ParseError {
    /// The text that failed to parse.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The underlying parser diagnostic.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Character offset into [`document`](Self::document) where parsing stopped.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not decode {:?} because of {} (char {})",
            self.document, self.reason, self.offset
        )
    }
}

impl std::error::Error for ParseError {}
