//! Transaction helpers.
use alloy::{
    consensus::{SignableTransaction, TxEip1559, TxEnvelope},
    eips::eip2718::Encodable2718,
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxKind, U256},
    rpc::types::TransactionRequest,
    signers::{local::PrivateKeySigner, SignerSync},
};

/// Chain id used by test transactions.
pub const TEST_CHAIN_ID: u64 = 1;

/// One gwei, in wei.
pub const GWEI: u128 = 1_000_000_000;

/// A plain value transfer request, with nothing but recipient and value set.
pub fn transfer_request(to: Address, value: U256) -> TransactionRequest {
    TransactionRequest::default().with_to(to).with_value(value)
}

/// Sign an EIP-1559 value transfer.
pub fn signed_transfer(signer: &PrivateKeySigner, to: Address, nonce: u64) -> TxEnvelope {
    let tx = TxEip1559 {
        chain_id: TEST_CHAIN_ID,
        nonce,
        gas_limit: 21_000,
        max_fee_per_gas: GWEI * 100,
        max_priority_fee_per_gas: GWEI,
        to: TxKind::Call(to),
        value: U256::from(1),
        ..Default::default()
    };
    let signature = signer.sign_hash_sync(&tx.signature_hash()).unwrap();
    TxEnvelope::Eip1559(tx.into_signed(signature))
}

/// Sign an EIP-1559 value transfer and return its EIP-2718 encoding.
pub fn raw_transfer(signer: &PrivateKeySigner, to: Address, nonce: u64) -> Bytes {
    signed_transfer(signer, to, nonce).encoded_2718().into()
}
