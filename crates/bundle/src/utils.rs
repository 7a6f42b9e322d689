use crate::DecodeError;
use alloy::{
    consensus::{
        transaction::{Recovered, SignerRecoverable},
        TxEnvelope,
    },
    eips::eip2718::Decodable2718,
    primitives::{keccak256, B256},
};

/// Hash of an EIP-2718 encoded signed transaction.
///
/// This is the keccak256 of the encoding, which is the transaction hash for
/// both legacy and typed transactions.
pub fn tx_hash(raw: &[u8]) -> B256 {
    keccak256(raw)
}

/// Hash identifying a bundle: keccak256 over the concatenated transaction
/// hashes, in bundle order.
pub fn bundle_hash<T: AsRef<[u8]>>(raw_txs: &[T]) -> B256 {
    let mut buf = Vec::with_capacity(raw_txs.len() * 32);
    for raw in raw_txs {
        buf.extend_from_slice(tx_hash(raw.as_ref()).as_slice());
    }
    keccak256(buf)
}

/// Decode an EIP-2718 signed transaction and recover its sender.
pub fn decode_signed(mut raw: &[u8]) -> Result<Recovered<TxEnvelope>, DecodeError> {
    let envelope = TxEnvelope::decode_2718(&mut raw)?;
    envelope.try_into_recovered().map_err(Into::into)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_garbage_fails() {
        assert!(matches!(decode_signed(&[0x7f, 0x01]), Err(DecodeError::Decoding(_))));
        assert!(decode_signed(&[]).is_err());
    }

    #[test]
    fn bundle_hash_is_order_sensitive() {
        let a = [0x01u8, 0x02];
        let b = [0x03u8, 0x04];
        assert_ne!(bundle_hash(&[&a[..], &b[..]]), bundle_hash(&[&b[..], &a[..]]));
        assert_eq!(bundle_hash::<&[u8]>(&[]), keccak256([0u8; 0]));
    }
}
