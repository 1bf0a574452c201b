//! Raw transaction and PSBT calls. None of these touch a wallet.

use bitcoin::{Amount, Txid};
use serde::Serialize;
use serde_json::Value;

use crate::amount::format_btc;
use crate::error::CoreError;
use crate::rpc::{methods, request, RpcTransport};
use crate::types::{OutputRef, PrevTx, TxOutputSpec};

/// Default `sighashtype` for `signrawtransactionwithkey`.
pub const DEFAULT_SIGHASH: &str = "ALL";

pub struct Raw<'a> {
    rpc: &'a dyn RpcTransport,
}

impl<'a> Raw<'a> {
    pub fn new(rpc: &'a dyn RpcTransport) -> Self {
        Self { rpc }
    }

    async fn call<P: Serialize>(&self, method: &str, params: P) -> Result<Value, CoreError> {
        request(self.rpc, method, params, None, None).await
    }

    /// Hex of a transaction, or a decoded object when `verbose`. Needs
    /// `-txindex` for anything not in the mempool or a wallet.
    pub async fn get_raw_transaction(
        &self,
        txid: &Txid,
        verbose: bool,
    ) -> Result<Value, CoreError> {
        self.call(methods::GET_RAW_TRANSACTION, (txid, verbose)).await
    }

    pub async fn decode_raw_transaction(&self, hex: &str) -> Result<Value, CoreError> {
        self.call(methods::DECODE_RAW_TRANSACTION, (hex,)).await
    }

    pub async fn create_raw_transaction(
        &self,
        inputs: &[OutputRef],
        outputs: &[TxOutputSpec],
        locktime: u32,
        replaceable: bool,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::CREATE_RAW_TRANSACTION,
            (inputs, outputs, locktime, replaceable),
        )
        .await
    }

    /// `options` is forwarded as-is; `None` omits the argument.
    pub async fn fund_raw_transaction(
        &self,
        hex: &str,
        options: Option<&Value>,
    ) -> Result<Value, CoreError> {
        match options {
            Some(options) => self.call(methods::FUND_RAW_TRANSACTION, (hex, options)).await,
            None => self.call(methods::FUND_RAW_TRANSACTION, (hex,)).await,
        }
    }

    pub async fn combine_raw_transaction(&self, txs: &[&str]) -> Result<Value, CoreError> {
        self.call(methods::COMBINE_RAW_TRANSACTION, (txs,)).await
    }

    /// `max_fee_rate` is in BTC/kvB; `None` keeps the node's default cap.
    pub async fn send_raw_transaction(
        &self,
        hex: &str,
        max_fee_rate: Option<Amount>,
    ) -> Result<Value, CoreError> {
        let max_fee_rate = max_fee_rate.map(format_btc);
        self.call(methods::SEND_RAW_TRANSACTION, (hex, max_fee_rate)).await
    }

    pub async fn sign_raw_transaction_with_key(
        &self,
        hex: &str,
        private_keys: &[&str],
        prev_txs: &[PrevTx],
        sighash_type: Option<&str>,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::SIGN_RAW_TRANSACTION_WITH_KEY,
            (
                hex,
                private_keys,
                prev_txs,
                sighash_type.unwrap_or(DEFAULT_SIGHASH),
            ),
        )
        .await
    }

    pub async fn analyze_psbt(&self, psbt: &str) -> Result<Value, CoreError> {
        self.call(methods::ANALYZE_PSBT, (psbt,)).await
    }

    pub async fn combine_psbt(&self, psbts: &[&str]) -> Result<Value, CoreError> {
        self.call(methods::COMBINE_PSBT, (psbts,)).await
    }

    /// `is_witness: None` lets the node try both serializations.
    pub async fn convert_to_psbt(
        &self,
        hex: &str,
        permit_sig_data: bool,
        is_witness: Option<bool>,
    ) -> Result<Value, CoreError> {
        self.call(methods::CONVERT_TO_PSBT, (hex, permit_sig_data, is_witness)).await
    }

    pub async fn create_psbt(
        &self,
        inputs: &[OutputRef],
        outputs: &[TxOutputSpec],
        locktime: u32,
        replaceable: bool,
    ) -> Result<Value, CoreError> {
        self.call(
            methods::CREATE_PSBT,
            (inputs, outputs, locktime, replaceable),
        )
        .await
    }

    pub async fn decode_psbt(&self, psbt: &str) -> Result<Value, CoreError> {
        self.call(methods::DECODE_PSBT, (psbt,)).await
    }

    pub async fn finalize_psbt(&self, psbt: &str) -> Result<Value, CoreError> {
        self.call(methods::FINALIZE_PSBT, (psbt,)).await
    }

    pub async fn join_psbts(&self, psbts: &[&str]) -> Result<Value, CoreError> {
        self.call(methods::JOIN_PSBTS, (psbts,)).await
    }

    pub async fn utxo_update_psbt(&self, psbt: &str) -> Result<Value, CoreError> {
        self.call(methods::UTXO_UPDATE_PSBT, (psbt,)).await
    }
}

#[cfg(test)]
mod tests {
    use bitcoin::hashes::Hash;
    use serde_json::json;

    use super::*;
    use crate::rpc::mock::MockTransport;

    fn txid() -> Txid {
        Txid::from_byte_array([0x22; 32])
    }

    #[tokio::test]
    async fn create_raw_transaction_sends_typed_inputs_and_outputs() {
        let rpc = MockTransport::builder()
            .with_result("createrawtransaction", json!("0200000000"))
            .build();

        let hex = Raw::new(&rpc)
            .create_raw_transaction(
                &[OutputRef::new(txid(), 1)],
                &[TxOutputSpec::Address {
                    address: "bcrt1qdest".to_owned(),
                    amount: Amount::from_sat(2_500_000),
                }],
                0,
                false,
            )
            .await
            .expect("result");
        assert_eq!(hex, json!("0200000000"));

        let call = rpc.only_call();
        assert_eq!(call.method, "createrawtransaction");
        assert_eq!(
            call.params,
            vec![
                json!([{"txid": txid().to_string(), "vout": 1}]),
                json!([{"bcrt1qdest": "0.025"}]),
                json!(0),
                json!(false),
            ]
        );
    }

    #[tokio::test]
    async fn fund_raw_transaction_omits_absent_options() {
        let rpc = MockTransport::builder().build();
        let raw = Raw::new(&rpc);
        raw.fund_raw_transaction("00", None).await.expect("result");
        raw.fund_raw_transaction("00", Some(&json!({"feeRate": "0.0001"})))
            .await
            .expect("result");

        let calls = rpc.calls();
        assert_eq!(calls[0].params, vec![json!("00")]);
        assert_eq!(calls[1].params, vec![json!("00"), json!({"feeRate": "0.0001"})]);
    }

    #[tokio::test]
    async fn list_arguments_are_wrapped_as_one_positional_param() {
        let rpc = MockTransport::builder().build();
        let raw = Raw::new(&rpc);
        raw.combine_raw_transaction(&["aa", "bb"]).await.expect("result");
        raw.combine_psbt(&["cHNidP8a", "cHNidP8b"]).await.expect("result");
        raw.join_psbts(&["cHNidP8a", "cHNidP8b"]).await.expect("result");
        raw.analyze_psbt("cHNidP8a").await.expect("result");

        let calls = rpc.calls();
        assert_eq!(calls[0].method, "combinerawtransaction");
        assert_eq!(calls[0].params, vec![json!(["aa", "bb"])]);
        assert_eq!(calls[1].method, "combinepsbt");
        assert_eq!(calls[1].params, vec![json!(["cHNidP8a", "cHNidP8b"])]);
        assert_eq!(calls[2].method, "joinpsbts");
        assert_eq!(calls[2].params, vec![json!(["cHNidP8a", "cHNidP8b"])]);
        assert_eq!(calls[3].method, "analyzepsbt");
        assert_eq!(calls[3].params, vec![json!("cHNidP8a")]);
    }

    #[tokio::test]
    async fn send_raw_transaction_encodes_fee_cap_as_btc_string() {
        let rpc = MockTransport::builder()
            .with_result("sendrawtransaction", json!(txid().to_string()))
            .build();
        let raw = Raw::new(&rpc);
        raw.send_raw_transaction("0200", Some(Amount::from_sat(10_000)))
            .await
            .expect("result");
        raw.send_raw_transaction("0200", None).await.expect("result");

        let calls = rpc.calls();
        assert_eq!(calls[0].params, vec![json!("0200"), json!("0.0001")]);
        assert_eq!(calls[1].params, vec![json!("0200"), Value::Null]);
    }

    #[tokio::test]
    async fn sign_with_key_defaults_sighash_to_all() {
        let rpc = MockTransport::builder().build();
        Raw::new(&rpc)
            .sign_raw_transaction_with_key("0200", &["cVkey"], &[], None)
            .await
            .expect("result");

        let call = rpc.only_call();
        assert_eq!(call.method, "signrawtransactionwithkey");
        assert_eq!(
            call.params,
            vec![json!("0200"), json!(["cVkey"]), json!([]), json!("ALL")]
        );
    }

    #[tokio::test]
    async fn convert_to_psbt_sends_null_for_unknown_witness_flag() {
        let rpc = MockTransport::builder().build();
        Raw::new(&rpc)
            .convert_to_psbt("0200", false, None)
            .await
            .expect("result");
        assert_eq!(
            rpc.only_call().params,
            vec![json!("0200"), json!(false), Value::Null]
        );
    }

    #[tokio::test]
    async fn get_raw_transaction_sends_verbose_flag() {
        let rpc = MockTransport::builder().build();
        Raw::new(&rpc)
            .get_raw_transaction(&txid(), true)
            .await
            .expect("result");

        let call = rpc.only_call();
        assert_eq!(call.wallet, None);
        assert_eq!(call.params, vec![json!(txid().to_string()), json!(true)]);
    }
}
