//! Relay constants.
//!
//! This crate contains the networks the relay serves, its default endpoints,
//! and the JSON-RPC method names used to talk to it.

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
#![cfg_attr(docsrs, feature(doc_cfg))]

mod network;
pub use network::{ParseNetworkError, RelayNetwork};

pub mod relay;
