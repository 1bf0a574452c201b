//! Typed views of a few RPC results.
//!
//! The catalogs return node results untouched as `serde_json::Value`; these
//! structs are for callers that only need a handful of well-known fields.

use bitcoin::BlockHash;
use serde::{Deserialize, Serialize};

// ==============================================================================
// Chain Info
// ==============================================================================

/// Basic chain information from `getblockchaininfo`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    #[serde(rename = "bestblockhash")]
    pub best_block_hash: BlockHash,
    #[serde(rename = "initialblockdownload", default)]
    pub initial_block_download: bool,
    pub pruned: bool,
}
