use alloy::{eips::BlockNumberOrTag, providers::Provider, transports::TransportResult};
use tracing::debug;

/// Format a block number as `0x`-prefixed hex.
pub fn hex_block_number(number: u64) -> String {
    format!("0x{number:x}")
}

/// Resolve a block tag to a concrete block number.
///
/// Numbers are returned as-is. `latest` asks the node for its block number.
/// Other tags look the block up, falling back to the latest block number
/// when the node has no such block.
pub async fn resolve_block_number<P: Provider>(
    provider: &P,
    tag: BlockNumberOrTag,
) -> TransportResult<u64> {
    let number = match tag {
        BlockNumberOrTag::Number(number) => return Ok(number),
        BlockNumberOrTag::Latest => provider.get_block_number().await?,
        tag => match provider.get_block_by_number(tag).await? {
            Some(block) => block.header.number,
            None => provider.get_block_number().await?,
        },
    };
    debug!(%tag, number, "resolved block tag");
    Ok(number)
}

/// Resolve the `state_block_number` param for a simulation.
///
/// No tag and `latest` are sent as `latest`. Anything else is resolved to a
/// number with [`resolve_block_number`] and sent as hex.
pub async fn resolve_state_block<P: Provider>(
    provider: &P,
    tag: Option<BlockNumberOrTag>,
) -> TransportResult<String> {
    match tag {
        None | Some(BlockNumberOrTag::Latest) => Ok(BlockNumberOrTag::Latest.to_string()),
        Some(tag) => resolve_block_number(provider, tag).await.map(hex_block_number),
    }
}
