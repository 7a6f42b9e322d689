use alloy::primitives::Address;
use std::collections::HashMap;

/// Next expected nonce per sender, built up while a single bundle is signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NonceTable {
    next: HashMap<Address, u64>,
}

impl NonceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next nonce expected for `sender`, if the sender has been seen.
    pub fn next_nonce(&self, sender: Address) -> Option<u64> {
        self.next.get(&sender).copied()
    }

    /// Record that `sender` used `nonce`. The next expected nonce becomes
    /// `nonce + 1`, replacing any previous entry.
    pub fn record(&mut self, sender: Address, nonce: u64) {
        self.next.insert(sender, nonce.saturating_add(1));
    }

    /// Number of senders in the table.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// True if no sender has been recorded.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }
}
