//! Typed parameters shared by the RPC catalogs.
//!
//! Each type serializes to exactly the JSON shape Bitcoin Core expects for
//! that argument. Amounts are sent as decimal BTC strings (see
//! [`crate::amount::format_btc`]) rather than floats.

use bitcoin::{Amount, BlockHash, Txid};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::amount::format_btc;

// ==============================================================================
// Block Selector
// ==============================================================================

/// A block named by hash or by height (`getblockstats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockRef {
    Hash(BlockHash),
    Height(u64),
}

impl From<BlockHash> for BlockRef {
    fn from(hash: BlockHash) -> Self {
        Self::Hash(hash)
    }
}

impl From<u64> for BlockRef {
    fn from(height: u64) -> Self {
        Self::Height(height)
    }
}

// ==============================================================================
// Transaction Building Blocks
// ==============================================================================

/// A reference to a transaction output, as used by `createrawtransaction`
/// inputs and `lockunspent`. `sequence` only matters when spending it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputRef {
    pub txid: Txid,
    pub vout: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

impl OutputRef {
    pub fn new(txid: Txid, vout: u32) -> Self {
        Self {
            txid,
            vout,
            sequence: None,
        }
    }
}

/// One entry of the `outputs` array: `{"<address>": "<amount>"}` or
/// `{"data": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutputSpec {
    Address { address: String, amount: Amount },
    Data(String),
}

impl Serialize for TxOutputSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Address { address, amount } => {
                map.serialize_entry(address, &format_btc(*amount))?;
            }
            Self::Data(hex) => map.serialize_entry("data", hex)?,
        }
        map.end()
    }
}

/// A previous output that the node may not know about, supplied when
/// signing (`signrawtransactionwithkey`, `signrawtransactionwithwallet`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrevTx {
    pub txid: Txid,
    pub vout: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    #[serde(rename = "redeemScript", skip_serializing_if = "Option::is_none")]
    pub redeem_script: Option<String>,
    #[serde(rename = "witnessScript", skip_serializing_if = "Option::is_none")]
    pub witness_script: Option<String>,
    #[serde(
        serialize_with = "serialize_opt_btc",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Amount>,
}

fn serialize_opt_btc<S: Serializer>(
    amount: &Option<Amount>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => serializer.serialize_str(&format_btc(*amount)),
        None => serializer.serialize_none(),
    }
}

// ==============================================================================
// Enumerated Options
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressType {
    Legacy,
    P2shSegwit,
    Bech32,
    Bech32m,
}

/// Fee estimate mode for wallet sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateMode {
    #[default]
    Unset,
    Economical,
    Conservative,
}
