use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CoreError, NodeError};

use super::RpcTransport;

/// One call as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
    pub wallet: Option<String>,
    pub timeout: Option<Duration>,
}

enum Canned {
    Result(Value),
    NodeError(Value),
}

/// A mock transport for testing the domain catalogs. Records every call and
/// answers with canned per-method results populated via the builder
/// pattern; unknown methods answer `null`.
pub struct MockTransport {
    responses: HashMap<String, Canned>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: HashMap::new(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// The single recorded call; panics if there was not exactly one.
    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().expect("length checked above")
    }
}

pub struct MockTransportBuilder {
    responses: HashMap<String, Canned>,
}

impl MockTransportBuilder {
    pub fn with_result(mut self, method: &str, result: Value) -> Self {
        self.responses
            .insert(method.to_owned(), Canned::Result(result));
        self
    }

    pub fn with_node_error(mut self, method: &str, error: Value) -> Self {
        self.responses
            .insert(method.to_owned(), Canned::NodeError(error));
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: self.responses,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(
        &self,
        method: &str,
        params: Vec<Value>,
        wallet: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Value, CoreError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(RecordedCall {
                method: method.to_owned(),
                params,
                wallet: wallet.map(str::to_owned),
                timeout,
            });

        match self.responses.get(method) {
            Some(Canned::Result(result)) => Ok(result.clone()),
            Some(Canned::NodeError(error)) => Err(NodeError::new(error.clone()).into()),
            None => Ok(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn records_calls_and_answers_canned_results() {
        let rpc = MockTransport::builder()
            .with_result("getblockcount", json!(812_000))
            .build();

        let result = rpc
            .call("getblockcount", Vec::new(), None, None)
            .await
            .expect("canned result");
        assert_eq!(result, json!(812_000));

        let call = rpc.only_call();
        assert_eq!(call.method, "getblockcount");
        assert!(call.params.is_empty());
        assert_eq!(call.wallet, None);
    }

    #[tokio::test]
    async fn canned_node_error_is_returned() {
        let rpc = MockTransport::builder()
            .with_node_error("loadwallet", json!({"code": -18, "message": "Wallet not found"}))
            .build();

        let err = rpc
            .call("loadwallet", vec![json!("w")], None, None)
            .await
            .expect_err("canned error");
        assert!(matches!(err, CoreError::Node(ref node) if node.code() == Some(-18)));
    }
}
