use crate::{
    blocks::{hex_block_number, resolve_block_number, resolve_state_block},
    types::{
        PrivateTxParams, RawSimulation, RpcRequest, SimulateBundleParams, SubmitBundleParams,
    },
    ConfigError, MevBuilders, PrivateTxResult, RelayConfig, RelayError, RelayResponse,
    SendBundleResult, SimulationResult, SubmitOptions,
};
use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Bytes, B256},
    providers::Provider,
};
use blxr_constants::{
    relay::{PRIVATE_TX, SIMULATE_BUNDLE, SUBMIT_BUNDLE},
    RelayNetwork,
};
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tracing::{debug, instrument, warn};

/// Client for the relay's JSON-RPC API.
///
/// Every call is a single HTTP request bounded by the configured timeout.
/// Failures are returned as [`RelayError`] values; nothing is retried.
///
/// Clones share the request id counter.
#[derive(Debug, Clone)]
pub struct RelayClient {
    /// The URL of the relay JSON-RPC endpoint.
    url: reqwest::Url,
    /// The base URL of the trace service.
    trace_url: reqwest::Url,
    /// Sent as the `Authorization` header.
    auth_header: String,
    /// Network bundles are sent to.
    network: RelayNetwork,
    /// The reqwest client used to send requests.
    client: reqwest::Client,
    /// Next JSON-RPC request id.
    next_id: Arc<AtomicU64>,
}

impl RelayClient {
    /// Create a new client with the given config and reqwest client. The
    /// client's own timeout applies; the config timeout is ignored.
    pub fn new_with_client(config: RelayConfig, client: reqwest::Client) -> Self {
        Self {
            url: config.relay_url,
            trace_url: config.trace_url,
            auth_header: config.auth_header,
            network: config.network,
            client,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a new client, building a reqwest client with the configured
    /// timeout.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::new_with_client(config, client))
    }

    /// Create a new client from the environment. See
    /// [`RelayConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(RelayConfig::from_env()?)
    }

    /// Get the client used to send requests
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Get the network bundles are sent to.
    pub const fn network(&self) -> RelayNetwork {
        self.network
    }

    /// Get the relay URL.
    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> RelayResponse<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = RpcRequest::new(method, params, self.next_id());
        debug!(method, id = request.id, "sending relay request");

        let response = match self
            .client
            .post(self.url.clone())
            .header(AUTHORIZATION, &self.auth_header)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(%err, method, "relay request failed");
                return RelayResponse::from_error(err.into());
            }
        };

        let status = response.status();
        match response.bytes().await {
            Ok(body) => parse_rpc_reply(status, &body),
            Err(err) => {
                warn!(%err, method, %status, "failed to read relay response");
                RelayResponse::from_error(RelayError::no_response())
            }
        }
    }

    /// Submit a signed bundle for inclusion at `target_block`.
    ///
    /// Transactions are sent hex-encoded without the `0x` prefix. The
    /// bundle is routed to all builders unless `options` names a set.
    #[instrument(skip_all, fields(txs = txs.len(), target_block))]
    pub async fn submit_bundle(
        &self,
        txs: &[Bytes],
        target_block: u64,
        options: SubmitOptions,
    ) -> RelayResponse<SendBundleResult> {
        let params = SubmitBundleParams {
            transaction: encode_txs(txs),
            blockchain_network: self.network,
            block_number: hex_block_number(target_block),
            mev_builders: options.mev_builders.unwrap_or_default(),
            blocks_count: options.blocks_count,
        };
        self.call(SUBMIT_BUNDLE, params).await
    }

    /// Simulate a signed bundle.
    ///
    /// `block_tag` is the block to simulate in. `state_block_tag` is the
    /// block whose state the simulation starts from, `latest` when absent.
    /// Symbolic tags are resolved to numbers through `provider`, except that
    /// `latest` is passed through as the state block. The relay reply is
    /// reshaped into a [`SimulationResult`].
    #[instrument(skip_all, fields(txs = txs.len(), %block_tag))]
    pub async fn simulate_bundle<P: Provider>(
        &self,
        provider: &P,
        txs: &[Bytes],
        block_tag: BlockNumberOrTag,
        state_block_tag: Option<BlockNumberOrTag>,
        timestamp: Option<u64>,
    ) -> Result<SimulationResult, RelayError> {
        let block_number = resolve_block_number(provider, block_tag)
            .await
            .inspect_err(|err| warn!(%err, "failed to resolve block tag"))
            .map_err(RelayError::client)?;
        let state_block_number = resolve_state_block(provider, state_block_tag)
            .await
            .inspect_err(|err| warn!(%err, "failed to resolve state block tag"))
            .map_err(RelayError::client)?;

        let params = SimulateBundleParams {
            transaction: encode_txs(txs),
            block_number: hex_block_number(block_number),
            state_block_number,
            blockchain_network: self.network,
            timestamp,
        };

        self.call::<_, RawSimulation>(SIMULATE_BUNDLE, params).await.into_result().map(Into::into)
    }

    /// Send a single signed transaction privately.
    #[instrument(skip_all)]
    pub async fn send_private_transaction(
        &self,
        tx: &Bytes,
        mev_builders: Option<MevBuilders>,
    ) -> RelayResponse<PrivateTxResult> {
        let params = PrivateTxParams { transaction: hex::encode(tx), mev_builders };
        self.call(PRIVATE_TX, params).await
    }

    /// Fetch the relay's trace of a bundle.
    ///
    /// The endpoint is `<trace url>/<network trace path>/<bundle hash>`, with
    /// the segments appended to any path the trace URL already has. The
    /// reply is returned as raw JSON.
    #[instrument(skip(self))]
    pub async fn trace_bundle(&self, bundle_hash: B256) -> Result<serde_json::Value, RelayError> {
        let mut url = self.trace_url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayError::client("trace URL cannot be a base"))
            .inspect_err(|e| warn!(%e, "Invalid trace URL. Not querying trace service."))?
            .pop_if_empty()
            .push(self.network.trace_path())
            .push(&hex::encode_prefixed(bundle_hash));

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .inspect_err(|e| warn!(%e, "Failed to get bundle trace"))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|_| RelayError::no_response())?;
        parse_raw_reply(status, &body)
    }
}

/// Hex-encode transactions without the `0x` prefix.
fn encode_txs(txs: &[Bytes]) -> Vec<String> {
    txs.iter().map(hex::encode).collect()
}

/// Interpret a JSON-RPC reply.
///
/// An empty body is a missing response whatever the status. A body that is
/// not a JSON-RPC envelope becomes an error carrying the HTTP status when
/// the status is an error, and an invalid-response error otherwise.
pub(crate) fn parse_rpc_reply<R: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> RelayResponse<R> {
    if body.trim_ascii().is_empty() {
        warn!(%status, "relay sent an empty reply");
        return RelayResponse::from_error(RelayError::no_response());
    }

    match serde_json::from_slice::<RelayResponse<R>>(body) {
        Ok(response) if response.error.is_some() || response.result.is_some() => response,
        Ok(_) if !status.is_success() => RelayResponse::from_error(status_error(status, body)),
        Ok(_) => RelayResponse::from_error(RelayError::invalid_response("missing result")),
        Err(_) if !status.is_success() => RelayResponse::from_error(status_error(status, body)),
        Err(err) => {
            warn!(%err, "failed to parse relay reply");
            RelayResponse::from_error(RelayError::invalid_response(err))
        }
    }
}

/// Interpret a plain JSON reply.
pub(crate) fn parse_raw_reply(
    status: StatusCode,
    body: &[u8],
) -> Result<serde_json::Value, RelayError> {
    if body.trim_ascii().is_empty() {
        return Err(RelayError::no_response());
    }
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    serde_json::from_slice(body).map_err(RelayError::invalid_response)
}

fn status_error(status: StatusCode, body: &[u8]) -> RelayError {
    RelayError::new(status.as_u16().into(), String::from_utf8_lossy(body).trim())
}
