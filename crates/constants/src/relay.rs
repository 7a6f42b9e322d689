//! Relay endpoints, method names, and request defaults.

use std::time::Duration;

/// Default JSON-RPC endpoint of the relay.
pub const RELAY_URL: &str = "https://mev.api.blxrbdn.com";

/// Default base URL of the bundle trace service.
pub const TRACE_URL: &str = "https://tools.bloxroute.com";

/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Method for submitting a bundle.
pub const SUBMIT_BUNDLE: &str = "blxr_submit_bundle";

/// Method for simulating a bundle.
pub const SIMULATE_BUNDLE: &str = "blxr_simulate_bundle";

/// Method for sending a single private transaction.
pub const PRIVATE_TX: &str = "blxr_private_tx";

/// Builder-set key that routes a bundle to every builder.
pub const ALL_BUILDERS: &str = "all";

/// Error code used for failures that never produced a relay reply.
pub const CLIENT_ERROR_CODE: i64 = -1;

/// Message used when the relay sent no usable reply.
pub const NO_RESPONSE_MESSAGE: &str = "rpc error: no response received from server";
