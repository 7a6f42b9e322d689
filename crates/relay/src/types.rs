//! JSON-RPC envelopes, request params and relay replies.
use crate::RelayError;
use alloy::primitives::{Address, Bytes, B256, U256};
use blxr_constants::{relay::ALL_BUILDERS, relay::JSONRPC_VERSION, RelayNetwork};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcRequest<P> {
    /// The method name.
    pub method: String,
    /// The method params.
    pub params: P,
    /// Request id, increasing per client.
    pub id: u64,
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
}

impl<P> RpcRequest<P> {
    /// Create a new request.
    pub fn new(method: &str, params: P, id: u64) -> Self {
        Self { method: method.to_owned(), params, id, jsonrpc: JSONRPC_VERSION.to_owned() }
    }
}

/// A JSON-RPC response envelope.
///
/// Exactly one of `result` and `error` is expected to be set. Failures that
/// never reached the relay are represented by an envelope with only `error`
/// set, so callers check [`RelayResponse::is_error`] rather than handling a
/// transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse<T> {
    /// The id echoed by the relay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// The result, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    /// The error, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RelayError>,
}

impl<T> RelayResponse<T> {
    /// A successful response.
    pub const fn from_result(result: T) -> Self {
        Self { id: None, result: Some(result), error: None }
    }

    /// A failed response.
    pub const fn from_error(error: RelayError) -> Self {
        Self { id: None, result: None, error: Some(error) }
    }

    /// True if the response carries an error.
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error, if any.
    pub const fn error(&self) -> Option<&RelayError> {
        self.error.as_ref()
    }

    /// The result, if any.
    pub const fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Convert into a [`Result`]. A response with neither result nor error
    /// is an invalid response.
    pub fn into_result(self) -> Result<T, RelayError> {
        match (self.error, self.result) {
            (Some(error), _) => Err(error),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(RelayError::invalid_response("missing result")),
        }
    }
}

impl<T> From<Result<T, RelayError>> for RelayResponse<T> {
    fn from(res: Result<T, RelayError>) -> Self {
        match res {
            Ok(result) => Self::from_result(result),
            Err(error) => Self::from_error(error),
        }
    }
}

/// The set of builders a bundle is routed to, keyed by builder name.
///
/// Defaults to `{"all": ""}`, which routes to every builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MevBuilders(BTreeMap<String, String>);

impl Default for MevBuilders {
    fn default() -> Self {
        Self::all()
    }
}

impl MevBuilders {
    /// Route to every builder.
    pub fn all() -> Self {
        Self::none().with_builder(ALL_BUILDERS)
    }

    /// An empty set, to be filled with [`MevBuilders::with_builder`].
    pub const fn none() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a builder by name.
    pub fn with_builder(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), String::new());
        self
    }

    /// Iterate over the builder names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for MevBuilders {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), |builders, name| builders.with_builder(name))
    }
}

/// Options for [`RelayClient::submit_bundle`].
///
/// [`RelayClient::submit_bundle`]: crate::RelayClient::submit_bundle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Number of blocks, starting at the target block, the bundle stays
    /// valid for.
    pub blocks_count: Option<u64>,
    /// Builders to route to. Defaults to all builders.
    pub mev_builders: Option<MevBuilders>,
}

impl SubmitOptions {
    /// Create a new [`SubmitOptions`] with default values.
    pub const fn new() -> Self {
        Self { blocks_count: None, mev_builders: None }
    }

    /// Set the block span.
    pub const fn with_blocks_count(mut self, blocks_count: u64) -> Self {
        self.blocks_count = Some(blocks_count);
        self
    }

    /// Set the builder set.
    pub fn with_mev_builders(mut self, mev_builders: MevBuilders) -> Self {
        self.mev_builders = Some(mev_builders);
        self
    }
}

/// Params of `blxr_submit_bundle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBundleParams {
    /// Signed transactions, hex without `0x`.
    pub transaction: Vec<String>,
    /// Target network.
    pub blockchain_network: RelayNetwork,
    /// Target block, `0x`-prefixed hex.
    pub block_number: String,
    /// Builder routing.
    pub mev_builders: MevBuilders,
    /// Block span, sent as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_count: Option<u64>,
}

/// Params of `blxr_simulate_bundle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulateBundleParams {
    /// Signed transactions, hex without `0x`.
    pub transaction: Vec<String>,
    /// Block to simulate in, `0x`-prefixed hex.
    pub block_number: String,
    /// Block whose state to simulate on top of: hex or a tag like `latest`.
    pub state_block_number: String,
    /// Target network.
    pub blockchain_network: RelayNetwork,
    /// Timestamp override for the simulated block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Params of `blxr_private_tx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateTxParams {
    /// Signed transaction, hex without `0x`.
    pub transaction: String,
    /// Builder routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mev_builders: Option<MevBuilders>,
}

/// Result of `blxr_submit_bundle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBundleResult {
    /// Hash identifying the bundle at the relay.
    pub bundle_hash: B256,
}

/// Result of `blxr_private_tx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateTxResult {
    /// Hash of the submitted transaction.
    pub tx_hash: B256,
}

/// Simulation outcome of one transaction in a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxSimulation {
    /// Transaction hash.
    pub tx_hash: B256,
    /// Gas used.
    pub gas_used: u64,
    /// Effective gas price.
    pub gas_price: U256,
    /// Gas fees paid.
    pub gas_fees: U256,
    /// Sender.
    pub from_address: Address,
    /// Recipient, absent for contract creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,
    /// Change in the coinbase balance caused by this transaction.
    pub coinbase_diff: U256,
    /// Value sent directly to the coinbase.
    pub eth_sent_to_coinbase: U256,
    /// Return data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Bytes>,
    /// Execution error, if the transaction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Revert reason, if the transaction reverted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revert: Option<String>,
}

impl TxSimulation {
    /// True if the transaction reverted or errored.
    pub const fn failed(&self) -> bool {
        self.error.is_some() || self.revert.is_some()
    }
}

/// Raw `blxr_simulate_bundle` reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSimulation {
    /// Aggregate gas price of the bundle.
    pub bundle_gas_price: U256,
    /// Bundle hash.
    pub bundle_hash: B256,
    /// Change in the coinbase balance.
    pub coinbase_diff: U256,
    /// Value sent directly to the coinbase.
    pub eth_sent_to_coinbase: U256,
    /// Aggregate gas fees.
    pub gas_fees: U256,
    /// Per-transaction outcomes.
    pub results: Vec<TxSimulation>,
    /// Block whose state was simulated on.
    pub state_block_number: u64,
    /// Total gas used, as reported by the relay.
    pub total_gas_used: u64,
}

/// A simulation result, reshaped from the relay reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Aggregate gas price of the bundle.
    pub bundle_gas_price: U256,
    /// Bundle hash.
    pub bundle_hash: B256,
    /// Change in the coinbase balance.
    pub coinbase_diff: U256,
    /// Value sent directly to the coinbase.
    pub eth_sent_to_coinbase: U256,
    /// Aggregate gas fees.
    pub gas_fees: U256,
    /// Per-transaction outcomes, in bundle order.
    pub results: Vec<TxSimulation>,
    /// Block whose state was simulated on.
    pub state_block_number: u64,
    /// Sum of `gas_used` over `results`.
    pub total_gas_used: u64,
    /// The first result that reverted or errored.
    pub first_revert: Option<TxSimulation>,
}

impl From<RawSimulation> for SimulationResult {
    fn from(raw: RawSimulation) -> Self {
        let total_gas_used = raw.results.iter().map(|r| r.gas_used).sum();
        let first_revert = raw.results.iter().find(|r| r.failed()).cloned();
        Self {
            bundle_gas_price: raw.bundle_gas_price,
            bundle_hash: raw.bundle_hash,
            coinbase_diff: raw.coinbase_diff,
            eth_sent_to_coinbase: raw.eth_sent_to_coinbase,
            gas_fees: raw.gas_fees,
            results: raw.results,
            state_block_number: raw.state_block_number,
            total_gas_used,
            first_revert,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_builders_route_to_all() {
        let json = serde_json::to_value(MevBuilders::default()).unwrap();
        assert_eq!(json, serde_json::json!({"all": ""}));

        let named: MevBuilders = ["flashbots", "beaverbuild"].into_iter().collect();
        assert_eq!(named.names().collect::<Vec<_>>(), vec!["beaverbuild", "flashbots"]);
    }

    #[test]
    fn submit_params_omit_absent_blocks_count() {
        let params = SubmitBundleParams {
            transaction: vec!["02f8".to_owned()],
            blockchain_network: RelayNetwork::Mainnet,
            block_number: "0x10".to_owned(),
            mev_builders: MevBuilders::default(),
            blocks_count: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "transaction": ["02f8"],
                "blockchain_network": "Mainnet",
                "block_number": "0x10",
                "mev_builders": {"all": ""},
            })
        );
    }

    #[test]
    fn response_into_result() {
        let ok: RelayResponse<u64> = serde_json::from_str(r#"{"id":1,"result":5}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), 5);

        let err: RelayResponse<u64> =
            serde_json::from_str(r#"{"id":1,"error":{"code":-32000,"message":"bad"}}"#).unwrap();
        assert!(err.is_error());
        assert_eq!(err.into_result().unwrap_err(), RelayError::new(-32000, "bad"));

        let empty: RelayResponse<u64> = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert!(empty.into_result().unwrap_err().is_client_error());
    }

    fn parse<R: serde::de::DeserializeOwned>(json: &str) -> RelayResponse<R> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn envelope_without_result_needs_no_default() {
        let resp = parse::<SendBundleResult>(r#"{"id":2,"error":{"code":-1,"message":"x"}}"#);
        assert_eq!(resp.result, None);
        assert_eq!(resp.error(), Some(&RelayError::new(-1, "x")));

        let resp = parse::<PrivateTxResult>(r#"{"id":3}"#);
        assert!(resp.result.is_none() && resp.error.is_none());
    }

    #[test]
    fn error_response_serializes_error_only() {
        let resp = RelayResponse::<SendBundleResult>::from_error(RelayError::no_response());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": {"code": -1, "message": "rpc error: no response received from server"}
            })
        );
    }

    #[test]
    fn reshape_simulation() {
        let raw: RawSimulation = serde_json::from_value(serde_json::json!({
            "bundleGasPrice": "476190476193",
            "bundleHash": B256::repeat_byte(0xbb),
            "coinbaseDiff": "20000000000126000",
            "ethSentToCoinbase": "20000000000000000",
            "gasFees": "126000",
            "results": [
                {
                    "txHash": B256::repeat_byte(1),
                    "gasUsed": 21000,
                    "fromAddress": Address::repeat_byte(0xaa),
                },
                {"txHash": B256::repeat_byte(2), "gasUsed": 30000, "error": "execution reverted"},
                {"txHash": B256::repeat_byte(3), "gasUsed": 40000, "revert": "nope"}
            ],
            "stateBlockNumber": 5221585,
            "totalGasUsed": 1
        }))
        .unwrap();

        let sim = SimulationResult::from(raw);
        assert_eq!(sim.bundle_gas_price, U256::from(476190476193u64));
        assert_eq!(sim.gas_fees, U256::from(126000));
        assert_eq!(sim.state_block_number, 5221585);
        assert_eq!(sim.total_gas_used, 91000);
        assert_eq!(sim.first_revert.as_ref().unwrap().tx_hash, B256::repeat_byte(2));
        assert_eq!(sim.results.len(), 3);
    }
}
