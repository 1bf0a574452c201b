//! Bitcoin Core RPC plumbing.
//!
//! Defines the [`RpcTransport`] trait that every domain catalog calls
//! through, the JSON-RPC envelope and response handling in [`protocol`],
//! and an HTTP implementation ([`HttpRpcClient`]) plus a test mock
//! (`mock::MockTransport`).

mod http_adapter;
pub mod methods;
#[cfg(test)]
pub mod mock;
pub mod protocol;
pub mod types;

pub use http_adapter::{HttpRpcClient, RpcConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV};
pub use types::ChainInfo;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Timeout applied to a call that does not ask for its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for calls the node may spend minutes on (`loadwallet`,
/// `importwallet`, `gettxoutsetinfo`).
pub const LONG_TIMEOUT: Duration = Duration::from_secs(180);

/// A JSON-RPC connection to a node.
///
/// `params` are positional and sent in order. `wallet` routes the call to
/// `/wallet/<name>`; `timeout: None` uses the transport's default. The
/// result is returned exactly as the node sent it.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: Vec<Value>,
        wallet: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Value, CoreError>;
}

/// Encode typed positional `params` (a tuple, slice or `Vec`) and issue the call.
pub async fn request<P: Serialize>(
    rpc: &dyn RpcTransport,
    method: &str,
    params: P,
    wallet: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Value, CoreError> {
    let params = protocol::encode_params(&params)?;
    rpc.call(method, params, wallet, timeout).await
}
