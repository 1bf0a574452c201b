use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::error::{CoreError, NodeError};
use crate::json::{decode_json, encode_value};

pub const JSONRPC_VERSION: &str = "2.0";

// ==============================================================================
// Request Envelope
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Vec<Value>,
    pub id: u64,
}

/// Strictly increasing request ids, owned by one client.
///
/// An id is spent when the envelope is built, so a call that later fails
/// still advances the sequence.
#[derive(Debug, Default)]
pub struct RequestIds {
    next: AtomicU64,
}

impl RequestIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next envelope will carry.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    pub fn build<'a>(&self, method: &'a str, params: Vec<Value>) -> JsonRpcRequest<'a> {
        JsonRpcRequest {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: self.next_id(),
        }
    }
}

/// Encode positional parameters.
///
/// Tuples, arrays and `Vec`s become the params array in order; `()` and
/// `None` become `[]`. Anything else is not a positional list.
pub fn encode_params<P: Serialize + ?Sized>(params: &P) -> Result<Vec<Value>, CoreError> {
    match encode_value(params)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items),
        other => Err(CoreError::Encoding(format!(
            "positional params must encode to a JSON array, got {other}"
        ))),
    }
}

// ==============================================================================
// Response Decoding
// ==============================================================================

/// Resolve a raw response body to the call's result.
///
/// A missing or `null` `error` is success, whatever `result` holds:
/// `null`, `0`, `false` and `{}` are all valid results.
pub fn decode_response(body: &str) -> Result<Value, CoreError> {
    let Value::Object(mut response) = decode_json(body)? else {
        return Err(CoreError::InvalidResponse(format!(
            "expected a JSON-RPC response object; body={body}"
        )));
    };

    match response.remove("error") {
        None | Some(Value::Null) => Ok(response.remove("result").unwrap_or(Value::Null)),
        Some(error) => Err(NodeError::new(error).into()),
    }
}
