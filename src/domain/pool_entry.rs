//! Registered pool record and its list summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Address, TokenDescriptor};

/// A pool as recorded by the [`super::PoolRegistry`].
///
/// An entry exists only for registered pools. The `tokens` order is the
/// canonical index order: index 0 is the first token passed at
/// registration, and pool math addresses tokens by that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolEntry {
    /// Pool address (immutable after registration).
    pub pool: Address,

    /// Human-readable pool name.
    pub name: String,

    /// Pool share symbol.
    pub symbol: String,

    /// Factory that deployed the pool.
    pub factory: Address,

    /// Registered tokens in canonical order.
    pub tokens: Vec<TokenDescriptor>,

    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

impl PoolEntry {
    /// Creates a new `PoolEntry`.
    #[must_use]
    pub fn new(
        pool: Address,
        name: String,
        symbol: String,
        factory: Address,
        tokens: Vec<TokenDescriptor>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pool,
            name,
            symbol,
            factory,
            tokens,
            registered_at,
        }
    }
}

/// Lightweight summary of a pool for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PoolSummary {
    /// Pool address.
    pub pool: Address,
    /// Pool name.
    pub name: String,
    /// Pool symbol.
    pub symbol: String,
    /// Number of registered tokens.
    pub token_count: usize,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

impl From<&PoolEntry> for PoolSummary {
    fn from(entry: &PoolEntry) -> Self {
        Self {
            pool: entry.pool,
            name: entry.name.clone(),
            symbol: entry.symbol.clone(),
            token_count: entry.tokens.len(),
            registered_at: entry.registered_at,
        }
    }
}
