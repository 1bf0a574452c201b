//! Client library for the Bitcoin Core JSON-RPC interface.
//!
//! [`Bitcoin`] wraps an [`rpc::RpcTransport`] (normally an
//! [`HttpRpcClient`]) and exposes the node's RPCs grouped as in its
//! reference: [`chain`], [`raw`], [`wallet`] and [`util`]. The [`amount`]
//! module converts between decimal and base-unit amount strings.

pub mod amount;
pub mod chain;
mod client;
pub mod error;
pub mod json;
pub mod raw;
pub mod rpc;
pub mod types;
pub mod util;
pub mod wallet;

pub use client::Bitcoin;
pub use error::{CoreError, NodeError, ParseError};
pub use rpc::{HttpRpcClient, RpcConfig, RpcTransport};
