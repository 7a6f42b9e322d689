//! Mocked node provider.
use alloy::{
    primitives::U64,
    providers::{Provider, ProviderBuilder},
    transports::mock::Asserter,
};

/// Create a provider answered by `asserter`, with no fillers.
///
/// Responses are consumed in request order, so tests push one response per
/// expected node query.
pub fn mock_provider(asserter: &Asserter) -> impl Provider + Clone {
    ProviderBuilder::new().disable_recommended_fillers().connect_mocked_client(asserter.clone())
}

/// Push a quantity response, as returned by `eth_getTransactionCount`,
/// `eth_estimateGas`, `eth_chainId` and `eth_blockNumber`.
pub fn push_quantity(asserter: &Asserter, value: u64) {
    asserter.push_success(&U64::from(value));
}
