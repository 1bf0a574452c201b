use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Url};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::json::encode_json;

use super::super::protocol::{decode_response, RequestIds};
use super::super::{RpcTransport, DEFAULT_TIMEOUT};
use super::connection::{resolve_auth, resolve_endpoint, wallet_url, ENDPOINT_ENV};

/// Connection settings for [`HttpRpcClient`].
///
/// `endpoint: None` reads `BITCOIN_HTTP_PROVIDER_URI` and falls back to
/// `http://127.0.0.1:8332`.
///
/// Authentication precedence:
/// 1. explicit `user` + `password`
/// 2. cookie file (`username:password`) from `cookie_file`
/// 3. no auth
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub endpoint: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub cookie_file: Option<PathBuf>,
    /// Timeout for calls that do not pass their own.
    pub default_timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            user: None,
            password: None,
            cookie_file: None,
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RpcConfig {
    pub fn new(
        endpoint: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            user: Some(user.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}

/// Bitcoin Core JSON-RPC client over HTTP(S).
///
/// One call is one POST; nothing is cached or retried. The client is cheap
/// to share behind an `Arc`: the only mutable state is the request id
/// sequence, which is atomic.
pub struct HttpRpcClient {
    client: reqwest::Client,
    url: Url,
    auth: Option<(String, String)>,
    default_timeout: Duration,
    ids: RequestIds,
}

impl HttpRpcClient {
    pub fn new(config: RpcConfig) -> Result<Self, CoreError> {
        let url = resolve_endpoint(
            config.endpoint.as_deref(),
            std::env::var(ENDPOINT_ENV).ok(),
        )?;
        let auth = resolve_auth(
            config.user.as_deref(),
            config.password.as_deref(),
            config.cookie_file.as_deref(),
        )?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::Configuration(format!("build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            auth,
            default_timeout: config.default_timeout,
            ids: RequestIds::new(),
        })
    }

    /// The resolved base endpoint.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The id the next call will carry.
    pub fn next_request_id(&self) -> u64 {
        self.ids.peek()
    }

    async fn rpc_call(
        &self,
        method: &str,
        params: Vec<Value>,
        wallet: Option<&str>,
        timeout: Duration,
    ) -> Result<Value, CoreError> {
        let req = self.ids.build(method, params);
        let id = req.id;
        debug!(
            rpc.id = id,
            rpc.method = method,
            rpc.params = req.params.len(),
            rpc.wallet = wallet,
            "rpc call"
        );

        let body = encode_json(&req)?;
        let url = wallet_url(&self.url, wallet)?;

        let mut builder = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().await?;
        let status = response.status();

        let body = response.text().await?;
        debug!(rpc.id = id, rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.id = id, rpc.method = method, body = %body, "rpc response body");

        // Bitcoin Core sends RPC errors as HTTP 500/404 with a JSON body, but
        // rejects bad credentials with a bare 401.
        if !status.is_success() && body.trim().is_empty() {
            return Err(CoreError::HttpStatus(status));
        }

        decode_response(&body)
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn call(
        &self,
        method: &str,
        params: Vec<Value>,
        wallet: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Value, CoreError> {
        self.rpc_call(
            method,
            params,
            wallet,
            timeout.unwrap_or(self.default_timeout),
        )
        .await
    }
}
