use crate::{RelayClient, RelayResponse, SendBundleResult, SubmitOptions};
use alloy::providers::Provider;
use blxr_bundle::{BundleItem, BundleSigner, SignError};
use tracing::instrument;

/// Signs bundles and submits them to the relay.
///
/// Local input errors (bad nonces, undecodable transactions) and node query
/// failures stop the call before anything is sent to the relay. Relay
/// failures are returned inside the [`RelayResponse`].
#[derive(Debug, Clone)]
pub struct BundleSender<P> {
    signer: BundleSigner<P>,
    client: RelayClient,
}

impl<P> BundleSender<P> {
    /// Create a new bundle sender.
    pub const fn new(signer: BundleSigner<P>, client: RelayClient) -> Self {
        Self { signer, client }
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &BundleSigner<P> {
        &self.signer
    }

    /// Get a reference to the relay client.
    pub const fn client(&self) -> &RelayClient {
        &self.client
    }
}

impl<P: Provider> BundleSender<P> {
    /// Sign `items` and submit the bundle for inclusion at `target_block`.
    #[instrument(skip_all, fields(items = items.len(), target_block))]
    pub async fn sign_and_submit(
        &self,
        items: Vec<BundleItem>,
        target_block: u64,
        options: SubmitOptions,
    ) -> Result<RelayResponse<SendBundleResult>, SignError> {
        let txs = self.signer.sign(items).await?;
        Ok(self.client.submit_bundle(&txs, target_block, options).await)
    }
}
