//! Token descriptors registered with a pool.

use serde::{Deserialize, Serialize};

use super::Address;

/// Decimal precision every token amount is normalised to.
pub const NORMALIZED_DECIMALS: u8 = 18;

/// Immutable record of a token's address and decimal precision.
///
/// Captured once at pool registration; the vault never re-reads the
/// decimals afterwards, so a token upgrade cannot shift a pool's
/// accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Token contract address.
    pub address: Address,
    /// Number of decimal places.
    pub decimals: u8,
}

impl TokenDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub const fn new(address: Address, decimals: u8) -> Self {
        Self { address, decimals }
    }

    /// Multiplier bringing a raw amount of this token to 18 decimals.
    ///
    /// Returns `None` for tokens with more than 18 decimals.
    #[must_use]
    pub fn scaling_factor(&self) -> Option<u128> {
        let diff = NORMALIZED_DECIMALS.checked_sub(self.decimals)?;
        10u128.checked_pow(u32::from(diff))
    }
}
