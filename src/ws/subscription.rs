//! Per-connection subscription manager.
//!
//! Tracks which pools a WebSocket client is subscribed to and provides
//! server-side event filtering. Vault-wide events bypass the filter.

use std::collections::HashSet;

use crate::domain::Address;

/// Manages the set of pool subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed pool addresses. If `subscribe_all` is true, this set is ignored.
    pools: HashSet<Address>,
    /// Whether the client subscribes to all pools (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds pools to the subscription set, optionally enabling the wildcard.
    pub fn subscribe(&mut self, pools: &[Address], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.pools.extend(pools.iter().copied());
    }

    /// Removes pools from the subscription set.
    pub fn unsubscribe(&mut self, pools: &[Address]) {
        for pool in pools {
            self.pools.remove(pool);
        }
    }

    /// Returns `true` if an event concerning `pool` should be delivered.
    ///
    /// `None` marks a vault-wide event, which every connection receives.
    #[must_use]
    pub fn matches(&self, pool: Option<Address>) -> bool {
        match pool {
            None => true,
            Some(pool) => self.subscribe_all || self.pools.contains(&pool),
        }
    }

    /// Returns the number of explicitly subscribed pools.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
