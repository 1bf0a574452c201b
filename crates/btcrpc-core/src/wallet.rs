//! Wallet calls.
//!
//! [`Wallet`] is a view bound to one wallet name: every call it makes is
//! routed to `/wallet/<name>`, or to the node root for the default view.
//! Calls that manage the set of loaded wallets live on [`Wallets`] and are
//! never routed.

use bitcoin::{Amount, BlockHash, Txid};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::amount::format_btc;
use crate::error::CoreError;
use crate::rpc::{methods, request, RpcTransport, LONG_TIMEOUT};
use crate::types::{AddressType, EstimateMode, OutputRef, PrevTx, TxOutputSpec};

/// Default `newsize` for `keypoolrefill`.
pub const DEFAULT_KEYPOOL_SIZE: u32 = 100;

// ==============================================================================
// Call Options
// ==============================================================================

#[derive(Debug, Clone, Default)]
pub struct CreateWalletOptions<'a> {
    pub disable_private_keys: bool,
    pub blank: bool,
    /// Encrypt the new wallet with this passphrase.
    pub passphrase: Option<&'a str>,
    pub avoid_reuse: bool,
    /// `None` keeps the node's default wallet kind.
    pub descriptors: Option<bool>,
    pub load_on_startup: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetBalanceOptions {
    pub min_conf: u32,
    pub include_watch_only: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ListReceivedOptions {
    pub min_conf: u32,
    pub include_empty: bool,
    pub include_watch_only: bool,
}

impl Default for ListReceivedOptions {
    fn default() -> Self {
        Self {
            min_conf: 1,
            include_empty: false,
            include_watch_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListSinceBlockOptions<'a> {
    /// `None` lists every wallet transaction.
    pub block_hash: Option<&'a BlockHash>,
    pub target_confirmations: u32,
    pub include_watch_only: bool,
    pub include_removed: bool,
}

impl Default for ListSinceBlockOptions<'_> {
    fn default() -> Self {
        Self {
            block_hash: None,
            target_confirmations: 1,
            include_watch_only: false,
            include_removed: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListTransactionsOptions<'a> {
    /// `None` matches every label (`"*"`).
    pub label: Option<&'a str>,
    pub count: u32,
    pub skip: u32,
    pub include_watch_only: bool,
}

impl Default for ListTransactionsOptions<'_> {
    fn default() -> Self {
        Self {
            label: None,
            count: 10,
            skip: 0,
            include_watch_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListUnspentOptions<'a> {
    pub min_conf: u32,
    pub max_conf: u32,
    /// Only outputs paying to these addresses; empty means all.
    pub addresses: &'a [&'a str],
    pub include_unsafe: bool,
    pub query_options: Option<&'a Value>,
}

impl Default for ListUnspentOptions<'_> {
    fn default() -> Self {
        Self {
            min_conf: 1,
            max_conf: 9_999_999,
            addresses: &[],
            include_unsafe: true,
            query_options: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SendManyOptions<'a> {
    pub min_conf: u32,
    pub comment: Option<&'a str>,
    pub subtract_fee_from: &'a [&'a str],
    pub replaceable: Option<bool>,
    pub conf_target: Option<u32>,
    pub estimate_mode: EstimateMode,
}

impl Default for SendManyOptions<'_> {
    fn default() -> Self {
        Self {
            min_conf: 1,
            comment: None,
            subtract_fee_from: &[],
            replaceable: None,
            conf_target: None,
            estimate_mode: EstimateMode::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SendToAddressOptions<'a> {
    pub comment: Option<&'a str>,
    pub comment_to: Option<&'a str>,
    pub subtract_fee_from_amount: bool,
    pub replaceable: Option<bool>,
    pub conf_target: Option<u32>,
    pub estimate_mode: EstimateMode,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WalletCreateFundedPsbtOptions<'a> {
    pub locktime: u32,
    /// Funding options object, forwarded as-is.
    pub options: Option<&'a Value>,
    pub bip32_derivs: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ProcessPsbtOptions<'a> {
    pub sign: bool,
    pub sighash_type: &'a str,
    pub bip32_derivs: bool,
}

impl Default for ProcessPsbtOptions<'_> {
    fn default() -> Self {
        Self {
            sign: true,
            sighash_type: "ALL",
            bip32_derivs: false,
        }
    }
}

// ==============================================================================
// Wallet View
// ==============================================================================

pub struct Wallet<'a> {
    rpc: &'a dyn RpcTransport,
    name: Option<&'a str>,
}

impl<'a> Wallet<'a> {
    /// `name: None` addresses the node's default wallet.
    pub fn new(rpc: &'a dyn RpcTransport, name: Option<&'a str>) -> Self {
        Self { rpc, name }
    }

    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value, CoreError> {
        request(self.rpc, method, params, self.name, None).await
    }

    pub async fn abandon_transaction(&self, txid: &Txid) -> Result<Value, CoreError> {
        self.call(methods::ABANDON_TRANSACTION, (txid,)).await
    }

    pub async fn abort_rescan(&self) -> Result<Value, CoreError> {
        self.call(methods::ABORT_RESCAN, ()).await
    }

    pub async fn add_multisig_address(
        &self,
        n_required: u32,
        keys: &[&str],
    ) -> Result<Value, CoreError> {
        self.call(methods::ADD_MULTISIG_ADDRESS, (n_required, keys)).await
    }

    pub async fn backup_wallet(&self, destination: &str) -> Result<Value, CoreError> {
        self.call(methods::BACKUP_WALLET, (destination,)).await
    }

    pub async fn bump_fee(&self, txid: &Txid) -> Result<Value, CoreError> {
        self.call(methods::BUMP_FEE, (txid,)).await
    }

    pub async fn dump_priv_key(&self, address: &str) -> Result<Value, CoreError> {
        self.call(methods::DUMP_PRIV_KEY, (address,)).await
    }

    /// Writes the wallet's keys to `filename` on the node's filesystem and
    /// returns the absolute path the node used.
    pub async fn dump_wallet(&self, filename: &str) -> Result<String, CoreError> {
        let result = self.call(methods::DUMP_WALLET, (filename,)).await?;
        result
            .get("filename")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                CoreError::InvalidResponse(format!("dumpwallet result has no filename: {result}"))
            })
    }

    pub async fn encrypt_wallet(&self, passphrase: &str) -> Result<Value, CoreError> {
        self.call(methods::ENCRYPT_WALLET, (passphrase,)).await
    }

    pub async fn get_addresses_by_label(&self, label: &str) -> Result<Value, CoreError> {
        self.call(methods::GET_ADDRESSES_BY_LABEL, (label,)).await
    }

    pub async fn get_address_info(&self, address: &str) -> Result<Value, CoreError> {
        self.call(methods::GET_ADDRESS_INFO, (address,)).await
    }

    pub async fn get_balance(&self, options: GetBalanceOptions) -> Result<Value, CoreError> {
        self.call(
            methods::GET_BALANCE,
            ("*", options.min_conf, options.include_watch_only),
        )
        .await
    }

    pub async fn get_new_address(
        &self,
        label: Option<&str>,
        address_type: Option<AddressType>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::GET_NEW_ADDRESS,
            (label.unwrap_or(""), address_type),
        )
        .await
    }

    pub async fn get_raw_change_address(
        &self,
        address_type: Option<AddressType>,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_RAW_CHANGE_ADDRESS, (address_type,)).await
    }

    pub async fn get_received_by_address(
        &self,
        address: &str,
        min_conf: u32,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_RECEIVED_BY_ADDRESS, (address, min_conf)).await
    }

    pub async fn get_received_by_label(
        &self,
        label: &str,
        min_conf: u32,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_RECEIVED_BY_LABEL, (label, min_conf)).await
    }

    pub async fn get_transaction(
        &self,
        txid: &Txid,
        include_watch_only: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_TRANSACTION, (txid, include_watch_only)).await
    }

    pub async fn get_wallet_info(&self) -> Result<Value, CoreError> {
        self.call(methods::GET_WALLET_INFO, ()).await
    }

    pub async fn import_address(
        &self,
        address: &str,
        label: &str,
        rescan: bool,
        p2sh: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::IMPORT_ADDRESS, (address, label, rescan, p2sh)).await
    }

    pub async fn import_multi(
        &self,
        requests: &Value,
        options: Option<&Value>,
    ) -> Result<Value, CoreError> {
        self.call(methods::IMPORT_MULTI, (requests, options)).await
    }

    pub async fn import_priv_key(
        &self,
        private_key: &str,
        label: &str,
        rescan: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::IMPORT_PRIV_KEY, (private_key, label, rescan)).await
    }

    pub async fn import_pruned_funds(
        &self,
        raw_transaction: &str,
        tx_out_proof: &str,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::IMPORT_PRUNED_FUNDS,
            (raw_transaction, tx_out_proof),
        )
        .await
    }

    pub async fn import_pubkey(
        &self,
        pubkey: &str,
        label: &str,
        rescan: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::IMPORT_PUBKEY, (pubkey, label, rescan)).await
    }

    /// Imports a dump made by [`Wallet::dump_wallet`]. May rescan, so it
    /// gets the long timeout.
    pub async fn import_wallet(&self, filename: &str) -> Result<Value, CoreError> {
        request(
            self.rpc,
            methods::IMPORT_WALLET,
            (filename,),
            self.name,
            Some(LONG_TIMEOUT),
        )
        .await
    }

    pub async fn keypool_refill(&self, new_size: Option<u32>) -> Result<Value, CoreError> {
        self.call(
            methods::KEYPOOL_REFILL,
            (new_size.unwrap_or(DEFAULT_KEYPOOL_SIZE),),
        )
        .await
    }

    pub async fn list_address_groupings(&self) -> Result<Value, CoreError> {
        self.call(methods::LIST_ADDRESS_GROUPINGS, ()).await
    }

    pub async fn list_labels(&self) -> Result<Value, CoreError> {
        self.call(methods::LIST_LABELS, ()).await
    }

    /// `address_filter` narrows the listing to one address.
    pub async fn list_received_by_address(
        &self,
        options: ListReceivedOptions,
        address_filter: Option<&str>,
    ) -> Result<Value, CoreError> {
        let ListReceivedOptions {
            min_conf,
            include_empty,
            include_watch_only,
        } = options;
        match address_filter {
            Some(filter) => {
                self.call(
                    methods::LIST_RECEIVED_BY_ADDRESS,
                    (min_conf, include_empty, include_watch_only, filter),
                )
                .await
            }
            None => {
                self.call(
                    methods::LIST_RECEIVED_BY_ADDRESS,
                    (min_conf, include_empty, include_watch_only),
                )
                .await
            }
        }
    }

    pub async fn list_received_by_label(
        &self,
        options: ListReceivedOptions,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::LIST_RECEIVED_BY_LABEL,
            (
                options.min_conf,
                options.include_empty,
                options.include_watch_only,
            ),
        )
        .await
    }

    pub async fn list_since_block(
        &self,
        options: ListSinceBlockOptions<'_>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::LIST_SINCE_BLOCK,
            (
                options.block_hash,
                options.target_confirmations,
                options.include_watch_only,
                options.include_removed,
            ),
        )
        .await
    }

    pub async fn list_transactions(
        &self,
        options: ListTransactionsOptions<'_>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::LIST_TRANSACTIONS,
            (
                options.label.unwrap_or("*"),
                options.count,
                options.skip,
                options.include_watch_only,
            ),
        )
        .await
    }

    pub async fn list_unspent(&self, options: ListUnspentOptions<'_>) -> Result<Value, CoreError> {
        self.call(
            methods::LIST_UNSPENT,
            (
                options.min_conf,
                options.max_conf,
                options.addresses,
                options.include_unsafe,
                options.query_options,
            ),
        )
        .await
    }

    /// `unlock: false` locks `outputs`; `unlock: true` with no outputs
    /// releases every lock.
    pub async fn lock_unspent(
        &self,
        unlock: bool,
        outputs: &[OutputRef],
    ) -> Result<Value, CoreError> {
        self.call(methods::LOCK_UNSPENT, (unlock, outputs)).await
    }

    pub async fn remove_pruned_funds(&self, txid: &Txid) -> Result<Value, CoreError> {
        self.call(methods::REMOVE_PRUNED_FUNDS, (txid,)).await
    }

    /// `stop_height: None` scans to the tip.
    pub async fn rescan_blockchain(
        &self,
        start_height: u64,
        stop_height: Option<u64>,
    ) -> Result<Value, CoreError> {
        self.call(methods::RESCAN_BLOCKCHAIN, (start_height, stop_height)).await
    }

    pub async fn send_many(
        &self,
        amounts: &[(&str, Amount)],
        options: SendManyOptions<'_>,
    ) -> Result<Value, CoreError> {
        let amounts: Map<String, Value> = amounts
            .iter()
            .map(|(address, amount)| ((*address).to_owned(), Value::String(format_btc(*amount))))
            .collect();
        self.call(
            methods::SEND_MANY,
            (
                "",
                amounts,
                options.min_conf,
                options.comment,
                options.subtract_fee_from,
                options.replaceable,
                options.conf_target,
                options.estimate_mode,
            ),
        )
        .await
    }

    pub async fn send_to_address(
        &self,
        address: &str,
        amount: Amount,
        options: SendToAddressOptions<'_>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::SEND_TO_ADDRESS,
            (
                address,
                format_btc(amount),
                options.comment,
                options.comment_to,
                options.subtract_fee_from_amount,
                options.replaceable,
                options.conf_target,
                options.estimate_mode,
            ),
        )
        .await
    }

    pub async fn set_label(&self, address: &str, label: &str) -> Result<Value, CoreError> {
        self.call(methods::SET_LABEL, (address, label)).await
    }

    /// Fee rate in BTC/kvB.
    pub async fn set_tx_fee(&self, fee_rate: Amount) -> Result<Value, CoreError> {
        self.call(methods::SET_TX_FEE, (format_btc(fee_rate),)).await
    }

    pub async fn sign_message(&self, address: &str, message: &str) -> Result<Value, CoreError> {
        self.call(methods::SIGN_MESSAGE, (address, message)).await
    }

    pub async fn sign_raw_transaction_with_wallet(
        &self,
        hex: &str,
        prev_txs: &[PrevTx],
    ) -> Result<Value, CoreError> {
        self.call(methods::SIGN_RAW_TRANSACTION_WITH_WALLET, (hex, prev_txs)).await
    }

    /// Unloads the wallet this view is bound to.
    pub async fn unload_wallet(&self) -> Result<Value, CoreError> {
        self.call(methods::UNLOAD_WALLET, ()).await
    }

    pub async fn wallet_create_funded_psbt(
        &self,
        inputs: &[OutputRef],
        outputs: &[TxOutputSpec],
        options: WalletCreateFundedPsbtOptions<'_>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::WALLET_CREATE_FUNDED_PSBT,
            (
                inputs,
                outputs,
                options.locktime,
                options.options,
                options.bip32_derivs,
            ),
        )
        .await
    }

    pub async fn wallet_lock(&self) -> Result<Value, CoreError> {
        self.call(methods::WALLET_LOCK, ()).await
    }

    /// Keeps the decryption key in memory for `timeout_secs`.
    pub async fn wallet_passphrase(
        &self,
        passphrase: &str,
        timeout_secs: u64,
    ) -> Result<Value, CoreError> {
        self.call(methods::WALLET_PASSPHRASE, (passphrase, timeout_secs)).await
    }

    pub async fn wallet_passphrase_change(
        &self,
        old_passphrase: &str,
        new_passphrase: &str,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::WALLET_PASSPHRASE_CHANGE,
            (old_passphrase, new_passphrase),
        )
        .await
    }

    pub async fn wallet_process_psbt(
        &self,
        psbt: &str,
        options: ProcessPsbtOptions<'_>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::WALLET_PROCESS_PSBT,
            (
                psbt,
                options.sign,
                options.sighash_type,
                options.bip32_derivs,
            ),
        )
        .await
    }
}

// ==============================================================================
// Wallet Management
// ==============================================================================

/// Node-level wallet management. These calls always go to the node root.
pub struct Wallets<'a> {
    rpc: &'a dyn RpcTransport,
}

impl<'a> Wallets<'a> {
    pub fn new(rpc: &'a dyn RpcTransport) -> Self {
        Self { rpc }
    }

    pub async fn create_wallet(
        &self,
        name: &str,
        options: &CreateWalletOptions<'_>,
    ) -> Result<Value, CoreError> {
        request(
            self.rpc,
            methods::CREATE_WALLET,
            (
                name,
                options.disable_private_keys,
                options.blank,
                options.passphrase.unwrap_or(""),
                options.avoid_reuse,
                options.descriptors,
                options.load_on_startup,
            ),
            None,
            None,
        )
        .await
    }

    /// Loading a large wallet can take minutes, so this gets the long timeout.
    pub async fn load_wallet(&self, name: &str) -> Result<Value, CoreError> {
        request(self.rpc, methods::LOAD_WALLET, (name,), None, Some(LONG_TIMEOUT)).await
    }

    pub async fn unload_wallet(&self, name: &str) -> Result<Value, CoreError> {
        request(self.rpc, methods::UNLOAD_WALLET, (name,), None, None).await
    }

    /// Names of the currently loaded wallets.
    pub async fn list_wallets(&self) -> Result<Value, CoreError> {
        request(self.rpc, methods::LIST_WALLETS, (), None, None).await
    }

    pub async fn list_wallet_dir(&self) -> Result<Value, CoreError> {
        request(self.rpc, methods::LIST_WALLET_DIR, (), None, None).await
    }
}
