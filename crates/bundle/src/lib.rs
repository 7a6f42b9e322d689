//! Bundle Library
//!
//! Contains the [`BundleItem`] type and the [`BundleSigner`], which turns a
//! mixed list of pre-signed and unsigned transactions into an ordered list of
//! signed encodings, keeping nonces consistent per sender.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{DecodeError, SignError};

mod fees;
pub use fees::max_base_fee_in_future_block;

mod item;
pub use item::{BundleItem, TxNonce, UnsignedItem};

mod nonce;
pub use nonce::NonceTable;

mod signer;
pub use signer::BundleSigner;

mod utils;
pub use utils::{bundle_hash, decode_signed, tx_hash};
