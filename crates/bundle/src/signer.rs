use crate::{decode_signed, BundleItem, NonceTable, SignError, UnsignedItem};
use alloy::{
    consensus::Transaction,
    eips::eip2718::Encodable2718,
    network::{Ethereum, EthereumWallet, NetworkWallet, TransactionBuilder},
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use tracing::{debug, instrument};

/// A bundle item after local validation, before any node query.
enum Prepared {
    Raw { raw: Bytes, sender: Address, nonce: u64 },
    Unsigned {
        request: TransactionRequest,
        wallet: EthereumWallet,
        sender: Address,
        nonce: Option<u64>,
    },
}

/// Signs bundles, keeping nonces consecutive per sender.
///
/// The provider is used for pending-nonce lookups, chain id lookups and gas
/// estimation, and only for fields the caller did not supply.
#[derive(Debug, Clone)]
pub struct BundleSigner<P> {
    provider: P,
}

impl<P> BundleSigner<P> {
    /// Create a new signer backed by `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Provider> BundleSigner<P> {
    /// Sign a bundle.
    ///
    /// Returns one EIP-2718 encoding per item, in input order. Raw items are
    /// passed through unchanged. Each unsigned item takes its nonce from, in
    /// order of preference: the item's explicit nonce, the request's nonce,
    /// the nonce following the sender's previous item in this bundle, or the
    /// sender's pending nonce on chain.
    ///
    /// Malformed explicit nonces and undecodable raw items fail the call
    /// before any node query is made.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn sign(&self, items: Vec<BundleItem>) -> Result<Vec<Bytes>, SignError> {
        let prepared =
            items.into_iter().enumerate().map(prepare).collect::<Result<Vec<_>, _>>()?;

        let mut table = NonceTable::new();
        let mut chain_id = None;
        let mut signed = Vec::with_capacity(prepared.len());

        for (index, item) in prepared.into_iter().enumerate() {
            let encoded = match item {
                Prepared::Raw { raw, sender, nonce } => {
                    table.record(sender, nonce);
                    raw
                }
                Prepared::Unsigned { request, wallet, sender, nonce } => {
                    let nonce = match nonce.or_else(|| table.next_nonce(sender)) {
                        Some(nonce) => nonce,
                        None => self.provider.get_transaction_count(sender).pending().await?,
                    };
                    let raw = self
                        .sign_request(index, request, &wallet, sender, nonce, &mut chain_id)
                        .await?;
                    table.record(sender, nonce);
                    raw
                }
            };
            signed.push(encoded);
        }

        Ok(signed)
    }

    async fn sign_request(
        &self,
        index: usize,
        mut request: TransactionRequest,
        wallet: &EthereumWallet,
        sender: Address,
        nonce: u64,
        chain_id: &mut Option<u64>,
    ) -> Result<Bytes, SignError> {
        request.set_from(sender);
        request.set_nonce(nonce);

        // No fee or type information means a legacy transaction at zero gas
        // price.
        if request.gas_price.is_none()
            && request.max_fee_per_gas.is_none()
            && request.max_priority_fee_per_gas.is_none()
            && request.transaction_type.is_none()
        {
            request.set_gas_price(0);
        }

        if request.chain_id.is_none() {
            let id = match *chain_id {
                Some(id) => id,
                None => {
                    let id = self.provider.get_chain_id().await?;
                    *chain_id = Some(id);
                    id
                }
            };
            request.set_chain_id(id);
        }

        if request.gas.is_none() {
            let gas = self.provider.estimate_gas(request.clone()).await?;
            request.set_gas_limit(gas);
        }

        let envelope = TransactionBuilder::<Ethereum>::build(request, wallet)
            .await
            .map_err(|source| SignError::Build { index, source })?;
        debug!(index, %sender, nonce, hash = %envelope.hash(), "signed bundle item");

        Ok(envelope.encoded_2718().into())
    }
}

/// Validate an item locally: decode raw items and parse explicit nonces.
fn prepare((index, item): (usize, BundleItem)) -> Result<Prepared, SignError> {
    match item {
        BundleItem::Raw(raw) => {
            let (envelope, sender) =
                decode_signed(&raw).map_err(|err| SignError::decode(index, err))?.into_parts();
            Ok(Prepared::Raw { raw, sender, nonce: envelope.nonce() })
        }
        BundleItem::Unsigned(UnsignedItem { request, nonce, wallet }) => {
            let sender = NetworkWallet::<Ethereum>::default_signer_address(&wallet);
            let nonce = match nonce {
                Some(explicit) => match explicit.resolve() {
                    Some(nonce) => Some(nonce),
                    None => {
                        return Err(SignError::InvalidNonce { index, nonce: explicit.to_string() })
                    }
                },
                None => request.nonce,
            };
            Ok(Prepared::Unsigned { request, wallet, sender, nonce })
        }
    }
}
