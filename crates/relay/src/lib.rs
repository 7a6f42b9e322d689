//! Relay client.
//!
//! Contains the [`RelayClient`], which submits, simulates and traces bundles
//! against the relay's JSON-RPC API, and the [`BundleSender`], which signs a
//! bundle and submits it in one step.
//!
//! Relay and transport failures are returned as data, as a [`RelayError`]
//! carrying a code and message, so callers branch on the response rather
//! than on a transport error type.

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

mod blocks;
pub use blocks::{hex_block_number, resolve_block_number, resolve_state_block};

mod client;
pub use client::RelayClient;

mod config;
pub use config::{ConfigError, RelayConfig};

pub mod env_utils;

mod error;
pub use error::RelayError;

mod sender;
pub use sender::BundleSender;

/// Request and response types for the [`RelayClient`].
pub mod types;
pub use types::{
    MevBuilders, PrivateTxResult, RelayResponse, SendBundleResult, SimulationResult,
    SubmitOptions, TxSimulation,
};
