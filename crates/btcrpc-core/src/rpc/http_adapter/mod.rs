//! JSON-RPC transport for Bitcoin Core compatible endpoints.
//!
//! Implements [`RpcTransport`](super::RpcTransport) over HTTP(S) using
//! `reqwest`, with basic or cookie-file auth, per-wallet routing and a
//! per-call timeout.

mod client;
mod connection;

pub use client::{HttpRpcClient, RpcConfig};
pub use connection::{DEFAULT_ENDPOINT, ENDPOINT_ENV};
