use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::chain::Chain;
use crate::error::CoreError;
use crate::raw::Raw;
use crate::rpc::{request, HttpRpcClient, RpcConfig, RpcTransport};
use crate::util::Util;
use crate::wallet::{Wallet, Wallets};

/// Entry point bundling a transport with the method catalogs.
///
/// Cloning is cheap; clones share the transport and its request id
/// sequence.
#[derive(Clone)]
pub struct Bitcoin {
    rpc: Arc<dyn RpcTransport>,
}

impl Bitcoin {
    pub fn new(rpc: Arc<dyn RpcTransport>) -> Self {
        Self { rpc }
    }

    /// Build an HTTP client from `config` and wrap it.
    pub fn connect(config: RpcConfig) -> Result<Self, CoreError> {
        Ok(Self::new(Arc::new(HttpRpcClient::new(config)?)))
    }

    pub fn transport(&self) -> &dyn RpcTransport {
        self.rpc.as_ref()
    }

    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self.rpc.as_ref())
    }

    pub fn raw(&self) -> Raw<'_> {
        Raw::new(self.rpc.as_ref())
    }

    /// A view whose calls are routed to the wallet `name`.
    pub fn wallet<'a>(&'a self, name: &'a str) -> Wallet<'a> {
        Wallet::new(self.rpc.as_ref(), Some(name))
    }

    /// A view on the node's default wallet (no routing).
    pub fn default_wallet(&self) -> Wallet<'_> {
        Wallet::new(self.rpc.as_ref(), None)
    }

    pub fn wallets(&self) -> Wallets<'_> {
        Wallets::new(self.rpc.as_ref())
    }

    pub fn util(&self) -> Util<'_> {
        Util::new(self.rpc.as_ref())
    }

    /// Any method by name, for calls the catalogs do not cover.
    pub async fn call<P: Serialize>(
        &self,
        method: &str,
        params: P,
        wallet: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Value, CoreError> {
        request(self.rpc.as_ref(), method, params, wallet, timeout).await
    }
}
