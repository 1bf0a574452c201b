use serde_json::Value;

use crate::error::CoreError;
use crate::rpc::{methods, request, RpcTransport};

pub struct Util<'a> {
    rpc: &'a dyn RpcTransport,
}

impl<'a> Util<'a> {
    pub fn new(rpc: &'a dyn RpcTransport) -> Self {
        Self { rpc }
    }

    /// Whether the node accepts `address` for its network.
    pub async fn validate_address(&self, address: &str) -> Result<bool, CoreError> {
        let result = request(self.rpc, methods::VALIDATE_ADDRESS, (address,), None, None).await?;
        result
            .get("isvalid")
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                CoreError::InvalidResponse(format!(
                    "validateaddress result has no isvalid: {result}"
                ))
            })
    }
}
