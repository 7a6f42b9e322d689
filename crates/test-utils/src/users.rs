//! Deterministic test keys.
use alloy::{
    primitives::{Address, B256},
    signers::local::PrivateKeySigner,
};
use std::sync::LazyLock;

/// Make a wallet with a deterministic keypair.
pub fn make_wallet(i: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(i)).unwrap()
}

/// Test signers, with keys `0x0101..`, `0x0202..`, and so on.
pub static TEST_SIGNERS: LazyLock<[PrivateKeySigner; 4]> =
    LazyLock::new(|| [1, 2, 3, 4].map(make_wallet));

/// Addresses of [`TEST_SIGNERS`].
pub static TEST_USERS: LazyLock<[Address; 4]> =
    LazyLock::new(|| TEST_SIGNERS.each_ref().map(|signer| signer.address()));
