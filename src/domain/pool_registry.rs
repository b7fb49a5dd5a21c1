//! Pool registry: which pools exist and which tokens they hold.
//!
//! [`PoolRegistry`] is plain owned state. It performs no locking and no
//! external calls; the [`super::Vault`] owns it and serialises every
//! mutation.

use std::collections::{HashMap, HashSet};

use super::pool_entry::{PoolEntry, PoolSummary};
use super::{Address, RegistryError, TokenDescriptor};

/// Default upper bound on tokens per pool.
pub const DEFAULT_MAX_TOKENS_PER_POOL: usize = 8;

/// Minimum number of tokens a pool must hold.
pub const MIN_TOKENS_PER_POOL: usize = 2;

/// Central store of registered pools.
///
/// Registration is one-way: there is no removal operation, and a pool
/// address can be registered at most once.
#[derive(Debug, Clone)]
pub struct PoolRegistry {
    pools: HashMap<Address, PoolEntry>,
    /// Pool addresses in registration order.
    order: Vec<Address>,
    max_tokens: usize,
}

impl PoolRegistry {
    /// Creates an empty registry with the default token limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_tokens(DEFAULT_MAX_TOKENS_PER_POOL)
    }

    /// Creates an empty registry accepting up to `max_tokens` per pool.
    ///
    /// Values below two are raised to two.
    #[must_use]
    pub fn with_max_tokens(max_tokens: usize) -> Self {
        Self {
            pools: HashMap::new(),
            order: Vec::new(),
            max_tokens: max_tokens.max(MIN_TOKENS_PER_POOL),
        }
    }

    /// Maximum number of tokens accepted per pool.
    #[must_use]
    pub const fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Checks a registration without applying it.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in this order:
    /// [`RegistryError::PoolAlreadyRegistered`],
    /// [`RegistryError::TooFewTokens`], [`RegistryError::TooManyTokens`],
    /// [`RegistryError::InvalidToken`], [`RegistryError::DuplicateToken`].
    pub fn validate(&self, pool: Address, tokens: &[TokenDescriptor]) -> Result<(), RegistryError> {
        if self.pools.contains_key(&pool) {
            return Err(RegistryError::PoolAlreadyRegistered(pool));
        }
        if tokens.len() < MIN_TOKENS_PER_POOL {
            return Err(RegistryError::TooFewTokens {
                count: tokens.len(),
            });
        }
        if tokens.len() > self.max_tokens {
            return Err(RegistryError::TooManyTokens {
                count: tokens.len(),
                max: self.max_tokens,
            });
        }

        let mut seen = HashSet::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            if token.address.is_zero() {
                return Err(RegistryError::InvalidToken { index });
            }
            if !seen.insert(token.address) {
                return Err(RegistryError::DuplicateToken(token.address));
            }
        }
        Ok(())
    }

    /// Registers a pool, preserving the token order as given.
    ///
    /// # Errors
    ///
    /// Returns the first failing check of [`Self::validate`]; the registry
    /// is left unchanged.
    pub fn register(&mut self, entry: PoolEntry) -> Result<(), RegistryError> {
        self.validate(entry.pool, &entry.tokens)?;
        self.order.push(entry.pool);
        self.pools.insert(entry.pool, entry);
        Ok(())
    }

    /// Returns `true` if the pool has been registered.
    #[must_use]
    pub fn is_registered(&self, pool: Address) -> bool {
        self.pools.contains_key(&pool)
    }

    /// Returns the registered pool entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PoolNotRegistered`] if the pool is absent.
    pub fn get(&self, pool: Address) -> Result<&PoolEntry, RegistryError> {
        self.pools
            .get(&pool)
            .ok_or(RegistryError::PoolNotRegistered(pool))
    }

    /// Returns the pool's tokens in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PoolNotRegistered`] if the pool is absent.
    pub fn tokens_of(&self, pool: Address) -> Result<&[TokenDescriptor], RegistryError> {
        self.get(pool).map(|entry| entry.tokens.as_slice())
    }

    /// Returns the 18-decimal scaling factor of each token, in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::PoolNotRegistered`] if the pool is absent,
    /// or [`RegistryError::UnsupportedDecimals`] for a token with more
    /// than 18 decimals.
    pub fn scaling_factors(&self, pool: Address) -> Result<Vec<u128>, RegistryError> {
        self.tokens_of(pool)?
            .iter()
            .map(|token| {
                token
                    .scaling_factor()
                    .ok_or(RegistryError::UnsupportedDecimals {
                        token: token.address,
                        decimals: token.decimals,
                    })
            })
            .collect()
    }

    /// Returns summaries of all pools in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<PoolSummary> {
        self.order
            .iter()
            .filter_map(|pool| self.pools.get(pool))
            .map(PoolSummary::from)
            .collect()
    }

    /// Returns the number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
