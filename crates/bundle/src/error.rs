use alloy::{
    eips::eip2718::Eip2718Error,
    network::{Ethereum, TransactionBuilderError},
    transports::TransportError,
};

/// Errors that can occur while decoding a pre-signed transaction and
/// recovering its sender.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Error occurred while decoding the transaction.
    #[error(transparent)]
    Decoding(#[from] Eip2718Error),

    /// Error occurred while recovering the signature.
    #[error(transparent)]
    Recovering(#[from] alloy::consensus::crypto::RecoveryError),
}

/// Errors returned by [`BundleSigner::sign`].
///
/// [`BundleSigner::sign`]: crate::BundleSigner::sign
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SignError {
    /// An explicit nonce was supplied but is not a number.
    #[error("invalid nonce {nonce:?} for bundle item {index}")]
    InvalidNonce {
        /// Index of the item in the bundle.
        index: usize,
        /// The offending nonce text.
        nonce: String,
    },

    /// A pre-signed transaction could not be decoded, or its sender could
    /// not be recovered.
    #[error("failed to decode signed transaction at index {index}: {source}")]
    Decode {
        /// Index of the item in the bundle.
        index: usize,
        /// The underlying decoding error.
        #[source]
        source: DecodeError,
    },

    /// A node query (nonce, chain id, gas estimation) failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),

    /// The transaction request could not be built or signed.
    #[error("failed to build transaction at index {index}: {source}")]
    Build {
        /// Index of the item in the bundle.
        index: usize,
        /// The underlying builder error.
        #[source]
        source: TransactionBuilderError<Ethereum>,
    },
}

impl SignError {
    /// Creates a new [`SignError::Decode`].
    pub fn decode(index: usize, source: impl Into<DecodeError>) -> Self {
        Self::Decode { index, source: source.into() }
    }

    /// True if the error was caused by malformed input rather than a node
    /// query or the signing wallet.
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::InvalidNonce { .. } | Self::Decode { .. })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn invalid_nonce_display() {
        let err = SignError::InvalidNonce { index: 2, nonce: "abc".to_owned() };
        assert_eq!(err.to_string(), "invalid nonce \"abc\" for bundle item 2");
        assert!(err.is_local());
    }

    #[test]
    fn decode_display_includes_index() {
        let err = SignError::decode(4, Eip2718Error::UnexpectedType(0x7f));
        assert!(err.to_string().starts_with("failed to decode signed transaction at index 4"));
        assert!(err.is_local());
    }

    #[test]
    fn wallet_and_node_errors_are_not_local() {
        let err = SignError::Build {
            index: 0,
            source: TransactionBuilderError::InvalidTransactionRequest(
                alloy::consensus::TxType::Legacy,
                vec!["to"],
            ),
        };
        assert!(!err.is_local());

        let err = SignError::Rpc(TransportError::local_usage_str("no node"));
        assert!(!err.is_local());
    }
}
