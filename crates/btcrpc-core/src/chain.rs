//! Blockchain and mempool queries.

use bitcoin::{BlockHash, Txid};
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::rpc::{methods, request, ChainInfo, RpcTransport, LONG_TIMEOUT};
use crate::types::BlockRef;

/// Default `checklevel` for `verifychain`.
pub const DEFAULT_CHECK_LEVEL: u8 = 3;

/// Default `nblocks` for `verifychain`.
pub const DEFAULT_CHECK_BLOCKS: u32 = 6;

pub struct Chain<'a> {
    rpc: &'a dyn RpcTransport,
}

impl<'a> Chain<'a> {
    pub fn new(rpc: &'a dyn RpcTransport) -> Self {
        Self { rpc }
    }

    async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value, CoreError> {
        request(self.rpc, method, params, None, None).await
    }

    pub async fn get_block_count(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_BLOCK_COUNT, ()).await
    }

    /// Hash of the tip of the most-work chain.
    pub async fn get_best_block_hash(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_BEST_BLOCK_HASH, ()).await
    }

    pub async fn get_block_hash(&self, height: u64) -> Result<Value, CoreError> {
        self.call(methods::GET_BLOCK_HASH, (height,)).await
    }

    /// `verbosity` 0 returns hex, 1 a block object, 2 a block object with
    /// decoded transactions.
    pub async fn get_block(&self, hash: &BlockHash, verbosity: u8) -> Result<Value, CoreError> {
        self.call(methods::GET_BLOCK, (hash, verbosity)).await
    }

    /// Per-block statistics. An empty `stats` list asks for all of them.
    pub async fn get_block_stats(
        &self,
        block: impl Into<BlockRef>,
        stats: &[&str],
    ) -> Result<Value, CoreError> {
        let stats = (!stats.is_empty()).then_some(stats);
        self.call(methods::GET_BLOCK_STATS, (block.into(), stats)).await
    }

    pub async fn get_blockchain_info(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_BLOCKCHAIN_INFO, ()).await
    }

    /// `getblockchaininfo`, reduced to the fields in [`ChainInfo`].
    pub async fn get_chain_info(&self) -> Result<ChainInfo, CoreError> {
        let raw = self.get_blockchain_info().await?;
        serde_json::from_value(raw).map_err(|e| {
            CoreError::InvalidResponse(format!("invalid getblockchaininfo result: {e}"))
        })
    }

    pub async fn get_chain_tips(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_CHAIN_TIPS, ()).await
    }

    pub async fn get_chain_tx_stats(
        &self,
        n_blocks: Option<u32>,
        block_hash: Option<&BlockHash>,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_CHAIN_TX_STATS, (n_blocks, block_hash)).await
    }

    pub async fn get_difficulty(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_DIFFICULTY, ()).await
    }

    pub async fn get_mempool_ancestors(
        &self,
        txid: &Txid,
        verbose: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_MEMPOOL_ANCESTORS, (txid, verbose)).await
    }

    pub async fn get_mempool_descendants(&self, txid: &Txid) -> Result<Value, CoreError> {
        self.call(methods::GET_MEMPOOL_DESCENDANTS, (txid,)).await
    }

    pub async fn get_mempool_entry(&self, txid: &Txid) -> Result<Value, CoreError> {
        self.call(methods::GET_MEMPOOL_ENTRY, (txid,)).await
    }

    pub async fn get_mempool_info(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_MEMPOOL_INFO, ()).await
    }

    pub async fn get_raw_mempool(&self, verbose: bool) -> Result<Value, CoreError> {
        self.call(methods::GET_RAW_MEMPOOL, (verbose,)).await
    }

    /// Details of an unspent output; `null` when it is spent or unknown.
    pub async fn get_tx_out(
        &self,
        txid: &Txid,
        vout: u32,
        include_mempool: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_TX_OUT, (txid, vout, include_mempool)).await
    }

    pub async fn get_tx_out_proof(
        &self,
        txids: &[Txid],
        block_hash: Option<&BlockHash>,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_TX_OUT_PROOF, (txids, block_hash)).await
    }

    /// Walks the whole UTXO set, so it gets the long timeout.
    pub async fn get_tx_out_set_info(&self) -> Result<Value, CoreError> {
        request(
            self.rpc,
            methods::GET_TX_OUT_SET_INFO,
            (),
            None,
            Some(LONG_TIMEOUT),
        )
        .await
    }

    pub async fn precious_block(&self, hash: &BlockHash) -> Result<Value, CoreError> {
        self.call(methods::PRECIOUS_BLOCK, (hash,)).await
    }

    pub async fn prune_blockchain(&self, height: u64) -> Result<Value, CoreError> {
        self.call(methods::PRUNE_BLOCKCHAIN, (height,)).await
    }

    /// `None` uses [`DEFAULT_CHECK_LEVEL`] / [`DEFAULT_CHECK_BLOCKS`].
    pub async fn verify_chain(
        &self,
        check_level: Option<u8>,
        n_blocks: Option<u32>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::VERIFY_CHAIN,
            (
                check_level.unwrap_or(DEFAULT_CHECK_LEVEL),
                n_blocks.unwrap_or(DEFAULT_CHECK_BLOCKS),
            ),
        )
        .await
    }

    pub async fn verify_tx_out_proof(&self, proof: &str) -> Result<Value, CoreError> {
        self.call(methods::VERIFY_TX_OUT_PROOF, (proof,)).await
    }
}
