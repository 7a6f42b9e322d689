use alloy::{
    consensus::TxEnvelope,
    eips::eip2718::Encodable2718,
    network::{Ethereum, EthereumWallet, NetworkWallet, TxSigner},
    primitives::{Address, Bytes, Signature},
    rpc::types::TransactionRequest,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A caller-supplied nonce.
///
/// Nonces often arrive from JSON, either as numbers or as decimal or
/// `0x`-prefixed hex strings. Text that is neither is rejected when the
/// bundle is signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxNonce {
    /// A numeric nonce.
    Number(u64),
    /// A textual nonce, parsed when the bundle is signed.
    Text(String),
}

impl TxNonce {
    /// Resolve the nonce to a number. Returns `None` for malformed text.
    pub fn resolve(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let s = s.trim();
                match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                    Some(hex) => u64::from_str_radix(hex, 16).ok(),
                    None => s.parse().ok(),
                }
            }
        }
    }
}

impl fmt::Display for TxNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TxNonce {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for TxNonce {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for TxNonce {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A transaction request paired with the wallet that will sign it.
#[derive(Clone)]
pub struct UnsignedItem {
    /// The transaction to sign. Missing nonce, gas, fee and chain id fields
    /// are filled in by the [`BundleSigner`].
    ///
    /// [`BundleSigner`]: crate::BundleSigner
    pub request: TransactionRequest,
    /// Explicit nonce, trusted over anything the signer would derive.
    pub nonce: Option<TxNonce>,
    /// The signing authority.
    pub wallet: EthereumWallet,
}

impl fmt::Debug for UnsignedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsignedItem")
            .field("request", &self.request)
            .field("nonce", &self.nonce)
            .field("signer", &self.signer_address())
            .finish()
    }
}

impl UnsignedItem {
    /// Create a new item signed by `wallet`.
    pub const fn new(request: TransactionRequest, wallet: EthereumWallet) -> Self {
        Self { request, nonce: None, wallet }
    }

    /// Create a new item signed by a single signer.
    pub fn from_signer<S>(request: TransactionRequest, signer: S) -> Self
    where
        S: TxSigner<Signature> + Send + Sync + 'static,
    {
        Self::new(request, EthereumWallet::new(signer))
    }

    /// Set an explicit nonce.
    pub fn with_nonce(mut self, nonce: impl Into<TxNonce>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// The address that will sign this item.
    pub fn signer_address(&self) -> Address {
        NetworkWallet::<Ethereum>::default_signer_address(&self.wallet)
    }
}

/// One entry of a bundle: either already signed, or still to be signed.
#[derive(Debug, Clone)]
pub enum BundleItem {
    /// An EIP-2718 encoded signed transaction, passed through unchanged.
    Raw(Bytes),
    /// A transaction request to be signed.
    Unsigned(UnsignedItem),
}

impl BundleItem {
    /// Create a raw item from an encoded signed transaction.
    pub fn raw(raw: impl Into<Bytes>) -> Self {
        Self::Raw(raw.into())
    }

    /// Create an unsigned item.
    pub const fn unsigned(item: UnsignedItem) -> Self {
        Self::Unsigned(item)
    }

    /// True if the item is already signed.
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl From<Bytes> for BundleItem {
    fn from(raw: Bytes) -> Self {
        Self::Raw(raw)
    }
}

impl From<TxEnvelope> for BundleItem {
    fn from(envelope: TxEnvelope) -> Self {
        Self::Raw(envelope.encoded_2718().into())
    }
}

impl From<UnsignedItem> for BundleItem {
    fn from(item: UnsignedItem) -> Self {
        Self::Unsigned(item)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nonce_resolves_numbers_and_text() {
        assert_eq!(TxNonce::from(7).resolve(), Some(7));
        assert_eq!(TxNonce::from("12").resolve(), Some(12));
        assert_eq!(TxNonce::from("0x1a").resolve(), Some(26));
        assert_eq!(TxNonce::from(" 0X10 ").resolve(), Some(16));
    }

    #[test]
    fn nonce_rejects_garbage() {
        assert_eq!(TxNonce::from("abc").resolve(), None);
        assert_eq!(TxNonce::from("0xzz").resolve(), None);
        assert_eq!(TxNonce::from("-1").resolve(), None);
        assert_eq!(TxNonce::from("").resolve(), None);
    }

    #[test]
    fn nonce_deserializes_untagged() {
        let n: TxNonce = serde_json::from_str("5").unwrap();
        assert_eq!(n, TxNonce::Number(5));
        let n: TxNonce = serde_json::from_str("\"0x5\"").unwrap();
        assert_eq!(n, TxNonce::Text("0x5".to_owned()));
    }

    #[test]
    fn raw_item_from_bytes() {
        let item = BundleItem::from(Bytes::from_static(&[0x02, 0xc0]));
        assert!(item.is_raw());
    }
}
